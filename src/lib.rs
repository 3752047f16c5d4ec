//! The unofficial BigPanda API client library.

pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub mod config;

pub use crate::core::client::{ApiClient, OimClient};
pub use crate::domain::model::{AlertStatus, MaintenancePlan, PlanEnd, PlanSchedule};
pub use crate::utils::error::{BigPandaError, Result};
