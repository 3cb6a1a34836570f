//! Infrastructure adapters

mod recorded_client;
mod reqwest_client;

pub use recorded_client::{RecordedCall, RecordedHttpClient, RecordedResponse};
pub use reqwest_client::ReqwestHttpClient;
