pub mod csvdata;
pub mod duration;
pub mod error;
pub mod logger;
pub mod timeparse;
pub mod validation;
