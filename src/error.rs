use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Server-provided detail when there is one, otherwise `fallback`.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            Self::Status { detail, .. } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn detail_or_prefers_server_detail() {
        let error = ApiError::Status {
            status: 409,
            detail: "No free tables for selected slot".to_string(),
        };
        assert_eq!(
            error.detail_or("Booking failed"),
            "No free tables for selected slot"
        );
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn detail_or_falls_back_when_detail_is_empty() {
        let error = ApiError::Status {
            status: 401,
            detail: String::new(),
        };
        assert_eq!(error.detail_or("Login failed"), "Login failed");
        assert!(error.is_unauthorized());
    }
}
