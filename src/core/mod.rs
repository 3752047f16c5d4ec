pub mod alerts;
pub mod client;
pub mod enrichment;
pub mod maintenance;

pub use crate::core::client::{ApiClient, OimClient};
