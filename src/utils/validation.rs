use crate::utils::error::{BigPandaError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BigPandaError::InvalidArgument {
            message: format!("'{field_name}' cannot be empty"),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BigPandaError::InvalidArgument {
                message: format!("'{field_name}' has unsupported URL scheme: {scheme}"),
            }),
        },
        Err(e) => Err(BigPandaError::InvalidArgument {
            message: format!("'{field_name}' is not a valid URL: {e}"),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BigPandaError::InvalidArgument {
            message: format!("'{field_name}' cannot be empty or whitespace-only"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://api.bigpanda.io").is_ok());
        assert!(validate_url("base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "plan").is_ok());
        assert!(validate_non_empty_string("name", "").is_err());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
