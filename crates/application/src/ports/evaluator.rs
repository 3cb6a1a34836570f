//! Response evaluation port

use apicheck_domain::{ScenarioFailure, response::ResponseSpec, testing::Assertion};

/// Port for checking a captured response against a list of assertions.
pub trait ResponseEvaluator: Send + Sync {
    /// Evaluates `assertions` in order against `response`.
    ///
    /// Stops at the first assertion that does not hold.
    ///
    /// # Errors
    ///
    /// Returns the first failure: an assertion mismatch, a body that is not
    /// JSON when a JSON assertion needs it, or a malformed assertion.
    fn evaluate(&self, assertions: &[Assertion], response: &ResponseSpec)
    -> Result<(), ScenarioFailure>;
}
