//! Application use cases.

mod run_suite;

pub use run_suite::RunSuite;
