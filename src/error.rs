// Error - Failure conditions of the configuration adapter
//
// Absence is not an error: unknown or non-inferable facts are reported as
// `None` by the accessors. Only the conditions below fail.

/// Adapter errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration cannot be expressed in this format.
    /// Fatal and not retryable.
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfig(String),

    #[error("Failed to read chain spec: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse chain spec: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn unsupported(what: impl Into<String>) -> Self {
        ConfigError::UnsupportedConfig(what.into())
    }

    /// Fatal errors signal a configuration incompatibility
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConfigError::UnsupportedConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_is_fatal() {
        let err = ConfigError::unsupported("engine kind unknown");
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Unsupported configuration: engine kind unknown");
    }

    #[test]
    fn test_io_is_not_fatal() {
        let err = ConfigError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(!err.is_fatal());
    }
}
