//! Error types for the `SkiTour` application
//!
//! Only configuration handling, interactive input and HTTP client
//! construction raise these. Upstream fetch failures never do; each source
//! folds them into its own error record instead.

use thiserror::Error;

/// Main error type for the `SkiTour` application
#[derive(Error, Debug)]
pub enum SkiTourError {
    /// Configuration file or field rejected
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// HTTP client could not be constructed
    #[error("API client error: {message}")]
    Api { message: String },

    /// Interactive input rejected
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl SkiTourError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API client error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Message suitable for direct display to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkiTourError::Config { message } => {
                format!("Configuration problem: {message}. Run 'skitour setup' to reconfigure.")
            }
            SkiTourError::Api { .. } => {
                "Could not initialize the HTTP client. Check your network setup and try again."
                    .to_string()
            }
            SkiTourError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_build_matching_variants() {
        assert!(matches!(
            SkiTourError::config("missing zone"),
            SkiTourError::Config { .. }
        ));
        assert!(matches!(
            SkiTourError::api("client build failed"),
            SkiTourError::Api { .. }
        ));
        assert!(matches!(
            SkiTourError::validation("bad latitude"),
            SkiTourError::Validation { .. }
        ));
    }

    #[test]
    fn test_user_message_per_variant() {
        let config_err = SkiTourError::config("unknown NWAC zone 'mt-rainier'");
        assert!(config_err.user_message().contains("mt-rainier"));
        assert!(config_err.user_message().contains("skitour setup"));

        let api_err = SkiTourError::api("tls backend unavailable");
        assert!(api_err.user_message().contains("HTTP client"));

        let validation_err = SkiTourError::validation("Invalid latitude: abc");
        assert!(validation_err.user_message().contains("Invalid latitude: abc"));
    }

    #[test]
    fn test_downcasts_through_anyhow() {
        // The binary downcasts to recover the user-facing message
        let err: anyhow::Error = SkiTourError::validation("bad longitude").into();
        let ski = err.downcast_ref::<SkiTourError>();
        assert!(matches!(ski, Some(SkiTourError::Validation { .. })));
    }
}
