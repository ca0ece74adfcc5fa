pub mod app_config;
pub mod error;
pub mod form;
pub mod state;

pub use app_config::Config;
pub use error::AppError;
pub use form::BookingForm;
pub use state::AppState;
