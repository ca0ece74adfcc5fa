use wayfare_catalog::FareConfigError;
use wayfare_core::{CoreError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] FareConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// The booking failed one or more field rules
    #[error("Booking rejected: {0}")]
    Rejected(ValidationErrors),
}

impl AppError {
    /// Field errors to show beside the form inputs, if this is a rejection
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            AppError::Rejected(errors) => Some(errors),
            _ => None,
        }
    }
}
