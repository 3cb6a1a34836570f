//! apicheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings loading and
//! report rendering.

pub mod adapters;
pub mod report;
pub mod settings;
pub mod testing;

pub use adapters::{RecordedCall, RecordedHttpClient, RecordedResponse, ReqwestHttpClient};
pub use report::{render_report, render_text};
pub use settings::{SettingsError, load_settings, load_settings_from};
pub use testing::{AssertionRunner, ParsedBody};
