pub mod locations;
pub mod request;
pub mod rules;
pub mod validation;

pub use locations::LocationSet;
pub use request::{BookingRequest, PassengerCount, Passengers};
pub use rules::{PassengerShape, ReturnLegPolicy, RuleMessages, RuleSet};
pub use validation::{BookingValidator, Field, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid rule set: {0}")]
    InvalidRuleSet(String),
    #[error("Booking request is missing {0}")]
    IncompleteRequest(&'static str),
}

pub type CoreResult<T> = Result<T, CoreError>;
