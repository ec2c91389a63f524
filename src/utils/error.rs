use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Product card #{} is missing its {}", card_number(*.index), .field)]
    MalformedCard { index: usize, field: MissingField },
}

/// One-based position of a card on the page, as shown in messages and logs.
pub fn card_number(index: usize) -> usize {
    index + 1
}

/// The piece of a product card that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Price,
    Rating,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MissingField::Name => "name (h3 > a[title])",
            MissingField::Price => "price (p.price_color)",
            MissingField::Rating => "rating (second class token of the first <p>)",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Parsing,
    Output,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::HttpError(_) => ErrorCategory::Network,
            EtlError::SelectorError { .. } | EtlError::MalformedCard { .. } => {
                ErrorCategory::Parsing
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::Output,
        }
    }

    /// Process exit code for a run that ended with this error.
    ///
    /// Kept in line with [`crate::core::etl::RunOutcome::exit_code`]: 2 shares
    /// the "fetch failed" meaning with a non-200 response.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Parsing => 4,
            ErrorCategory::Output => 5,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::HttpError(e) if e.is_timeout() => {
                "The catalogue server did not answer in time".to_string()
            }
            EtlError::HttpError(e) if e.is_connect() => {
                "Could not connect to the catalogue server".to_string()
            }
            EtlError::HttpError(_) => "Could not get HTML content".to_string(),
            EtlError::MalformedCard { index, field } => {
                format!("Product #{} on the page has no {}", card_number(*index), field)
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                format!("Could not write the output file: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the --url/--output flags and the TOML configuration file"
            }
            ErrorCategory::Network => "Check your network connection and the catalogue URL",
            ErrorCategory::Parsing => {
                "The page layout may have changed; rerun with --on-malformed skip to keep the readable cards"
            }
            ErrorCategory::Output => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_category() {
        let config = EtlError::ConfigValidationError {
            field: "transform.currency_from".to_string(),
            message: "currency_from and currency_to must be set together".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.exit_code(), 1);

        let malformed = EtlError::MalformedCard {
            index: 3,
            field: MissingField::Price,
        };
        assert_eq!(malformed.category(), ErrorCategory::Parsing);
        assert_eq!(malformed.exit_code(), 4);

        let io = EtlError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.exit_code(), 5);
    }

    #[test]
    fn test_malformed_card_numbering_is_one_based_everywhere() {
        let err = EtlError::MalformedCard {
            index: 0,
            field: MissingField::Rating,
        };
        assert_eq!(card_number(0), 1);
        assert!(err.user_friendly_message().starts_with("Product #1 "));
        assert!(err.to_string().starts_with("Product card #1 "));
    }
}
