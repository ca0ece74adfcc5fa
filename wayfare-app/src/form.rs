use chrono::NaiveDate;
use tracing::{debug, info, warn};
use wayfare_catalog::{FareBreakdown, FareError};
use wayfare_core::{BookingRequest, Field, ValidationErrors};
use wayfare_shared::{BookingSummary, Product};

use crate::error::AppError;
use crate::state::AppState;

/// Inputs whose change invalidates the current fare quote
const FARE_INPUTS: [Field; 4] = [
    Field::Origin,
    Field::Destination,
    Field::VehicleClass,
    Field::TripType,
];

/// Transient state behind one booking form.
///
/// Holds the request being edited plus the last validation and quote results.
/// The engine itself stays stateless; this type only re-invokes it.
pub struct BookingForm {
    state: AppState,
    request: BookingRequest,
    errors: ValidationErrors,
    quote: Option<Result<FareBreakdown, FareError>>,
}

impl BookingForm {
    pub fn new(state: AppState, product: Product) -> Self {
        Self::with_request(state, BookingRequest::new(product))
    }

    pub fn with_request(state: AppState, request: BookingRequest) -> Self {
        let mut form = Self {
            state,
            request,
            errors: ValidationErrors::new(),
            quote: None,
        };
        form.refresh_quote();
        form
    }

    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn quote(&self) -> Option<&Result<FareBreakdown, FareError>> {
        self.quote.as_ref()
    }

    /// Apply a user edit to one input. Clears that input's error and,
    /// for fare inputs, re-prices the trip.
    pub fn edit<F>(&mut self, field: Field, apply: F)
    where
        F: FnOnce(&mut BookingRequest),
    {
        apply(&mut self.request);
        if self.errors.clear(field).is_some() {
            debug!(%field, "cleared field error after edit");
        }
        // Clearing a passenger category also settles the aggregate complaint
        if matches!(field, Field::Adults | Field::Children | Field::Infants) {
            self.errors.clear(Field::Passengers);
        }
        if FARE_INPUTS.contains(&field) {
            self.refresh_quote();
        }
    }

    /// Re-run the estimator against the current inputs. Safe to call on every keystroke.
    pub fn refresh_quote(&mut self) {
        self.quote = self.state.quote(&self.request);
        match &self.quote {
            Some(Ok(fare)) => debug!(total = fare.total, distance = fare.distance, "fare quoted"),
            Some(Err(err)) => debug!(error = %err, "unable to price trip"),
            None => {}
        }
    }

    /// Validate everything; on success produce the hand-off summary.
    pub fn submit(&mut self, today: NaiveDate) -> Result<BookingSummary, AppError> {
        let validator = self.state.validator(self.request.product)?;
        self.errors = validator.validate(&self.request, today);

        if !self.errors.is_valid() {
            warn!(
                product = %self.request.product,
                fields = ?self.errors.iter().map(|(field, _)| field.as_str()).collect::<Vec<_>>(),
                "booking rejected"
            );
            return Err(AppError::Rejected(self.errors.clone()));
        }

        let mut summary = self.request.summary()?;
        if let Some(Ok(fare)) = &self.quote {
            summary = summary.with_fare(fare.total, fare.currency.clone());
        }

        info!(
            reference = %summary.reference,
            product = %summary.product,
            contact = ?self.request.contact_number,
            "booking accepted"
        );
        Ok(summary)
    }
}
