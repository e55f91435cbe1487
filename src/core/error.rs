//! Error types for the i18n core and its tools

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown scope: {0}")]
    UnknownScope(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Missing translation document for locale {0}")]
    MissingDocument(String),

    #[error("Invalid translation document for locale {locale}: {reason}")]
    InvalidDocument { locale: String, reason: String },

    #[error("Locale {locale} is not allowed in scope {scope}")]
    InvalidLocaleSelection { locale: String, scope: String },

    #[error("Conflicting translation key: {0}")]
    KeyConflict(String),

    #[error("Invalid translation key: {0:?}")]
    InvalidKey(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation service error: {0}")]
    Translation(String),
}

impl Error {
    /// Errors that must stop startup rather than be recovered from
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::UnknownScope(_)
                | Error::UnknownLocale(_)
                | Error::MissingDocument(_)
                | Error::InvalidDocument { .. }
        )
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_class() {
        assert!(Error::UnknownScope("kiosk".into()).is_configuration());
        assert!(Error::MissingDocument("fr".into()).is_configuration());
        assert!(!Error::InvalidLocaleSelection {
            locale: "fr".into(),
            scope: "admin".into(),
        }
        .is_configuration());
        assert!(!Error::KeyConflict("nav".into()).is_configuration());
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidLocaleSelection {
            locale: "fr".into(),
            scope: "admin".into(),
        };
        assert_eq!(err.to_string(), "Locale fr is not allowed in scope admin");
    }
}
