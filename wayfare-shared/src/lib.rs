pub mod models;
pub mod pii;

pub use models::summary::BookingSummary;
pub use models::trip::{Product, TripType, UnknownVehicleClass, VehicleClass};
pub use pii::Masked;
