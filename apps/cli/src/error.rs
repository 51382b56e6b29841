//! Error types for the CLI.

use billsplit_core::ApiError;

/// Errors raised while reading input, calculating or printing.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request document: {0}")]
    Request(#[source] serde_json::Error),

    #[error("Invalid item '{spec}': {reason}")]
    ItemSpec { spec: String, reason: String },

    /// The bill itself was rejected by the calculator.
    #[error("{0}")]
    Rejected(#[from] ApiError),

    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use billsplit_core::{CoreError, ValidationError};

    #[test]
    fn test_rejected_displays_core_message() {
        let api: ApiError = CoreError::from(ValidationError::InvalidTax { value: -1.0 }).into();
        let err = CliError::from(api);
        assert_eq!(
            err.to_string(),
            "[InvalidTax] Validation error: Tax must be a non-negative number within range, got -1"
        );
    }

    #[test]
    fn test_item_spec_message() {
        let err = CliError::ItemSpec {
            spec: "Pizza".to_string(),
            reason: "expected NAME:RATE:QUANTITY:PEOPLE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid item 'Pizza': expected NAME:RATE:QUANTITY:PEOPLE"
        );
    }
}
