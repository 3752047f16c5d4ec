use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BigPandaError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("BigPanda API returned {status}: {detail}")]
    Api { status: StatusCode, detail: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unable to parse '{field}' as a datetime: '{value}'")]
    DateTimeParse { field: String, value: String },

    #[error("Unable to parse duration: '{value}'")]
    DurationParse { value: String },

    #[error("No mapping enrichment named '{name}' exists at BigPanda")]
    EnrichmentNotFound { name: String },

    #[error("Job ID not returned by upload to BigPanda")]
    MissingJobId,

    #[error("Upload with job ID {job_id} failed")]
    JobFailed { job_id: String },
}

pub type Result<T> = std::result::Result<T, BigPandaError>;
