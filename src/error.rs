use thiserror::Error;

use crate::domain::LedgerError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, StateViolation};

    #[test]
    fn ledger_errors_pass_through_transparently() {
        let err = Error::from(LedgerError::from(StateViolation::NotResolved));
        assert!(matches!(&err, Error::Ledger(inner) if inner.kind() == ErrorKind::InvalidState));
        assert_eq!(
            err.to_string(),
            LedgerError::from(StateViolation::NotResolved).to_string()
        );
    }

    #[test]
    fn config_error_names_the_field() {
        let err = Error::from(ConfigError::InvalidValue {
            field: "fee_bps",
            reason: "must be at most 1000".into(),
        });
        assert_eq!(
            err.to_string(),
            "invalid value for fee_bps: must be at most 1000"
        );
    }
}
