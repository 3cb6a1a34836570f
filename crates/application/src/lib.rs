//! apicheck Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport and response evaluation)
//! - Use case orchestration (executing one request, running a suite)

pub mod execute_request;
pub mod ports;
pub mod use_cases;

pub use execute_request::{ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use ports::{HttpClient, HttpClientError, ResponseEvaluator};
pub use use_cases::RunSuite;
