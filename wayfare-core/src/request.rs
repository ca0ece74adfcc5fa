use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wayfare_shared::{BookingSummary, Masked, Product, TripType, VehicleClass};

use crate::{CoreError, CoreResult};

/// Snapshot of a booking form as submitted by the UI.
///
/// Every input is optional so that an incomplete form can still be validated
/// and every problem reported at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub product: Product,
    #[serde(default)]
    pub trip_type: Option<TripType>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub passengers: Option<Passengers>,
    #[serde(default)]
    pub contact_number: Option<Masked<String>>,
    #[serde(default)]
    pub vehicle_class: Option<VehicleClass>,
}

/// Party size, either broken down by age category (flights) or a single head count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Passengers {
    Breakdown(PassengerCount),
    Total(i32),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerCount {
    #[serde(default)]
    pub adults: i32,
    #[serde(default)]
    pub children: i32,
    #[serde(default)]
    pub infants: i32,
}

impl PassengerCount {
    pub fn new(adults: i32, children: i32, infants: i32) -> Self {
        Self { adults, children, infants }
    }

    /// Widened so that no combination of form inputs can overflow
    pub fn total(&self) -> i64 {
        i64::from(self.adults) + i64::from(self.children) + i64::from(self.infants)
    }
}

impl Passengers {
    pub fn total(&self) -> i64 {
        match self {
            Passengers::Breakdown(count) => count.total(),
            Passengers::Total(n) => i64::from(*n),
        }
    }

    /// Human readable party size for the booking summary
    pub fn describe(&self, product: Product) -> String {
        match self {
            Passengers::Breakdown(count) => {
                let parts: Vec<String> = [
                    (count.adults, "adult", "adults"),
                    (count.children, "child", "children"),
                    (count.infants, "infant", "infants"),
                ]
                .into_iter()
                .filter(|(n, _, _)| *n > 0)
                .map(|(n, one, many)| format!("{} {}", n, if n == 1 { one } else { many }))
                .collect();
                parts.join(", ")
            }
            Passengers::Total(n) => {
                let (one, many) = match product {
                    Product::Hotel => ("guest", "guests"),
                    _ => ("passenger", "passengers"),
                };
                format!("{} {}", n, if *n == 1 { one } else { many })
            }
        }
    }
}

impl BookingRequest {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            trip_type: None,
            origin: None,
            destination: None,
            departure_date: None,
            return_date: None,
            passengers: None,
            contact_number: None,
            vehicle_class: None,
        }
    }

    /// Build the hand-off summary. Call only after validation passed;
    /// a request missing a mandatory piece is rejected.
    pub fn summary(&self) -> CoreResult<BookingSummary> {
        let destination = non_blank(&self.destination)
            .ok_or(CoreError::IncompleteRequest("destination"))?;
        let departure_date = self
            .departure_date
            .ok_or(CoreError::IncompleteRequest("departure date"))?;
        let passengers = self.passengers.ok_or(CoreError::IncompleteRequest("passengers"))?;
        let contact = self
            .contact_number
            .as_ref()
            .map(|c| c.expose().clone())
            .ok_or(CoreError::IncompleteRequest("contact number"))?;

        let mut summary = BookingSummary::new(
            self.product,
            destination.to_string(),
            departure_date,
            passengers.describe(self.product),
            contact,
        );
        summary.trip_type = self.trip_type;
        summary.origin = non_blank(&self.origin).map(str::to_string);
        summary.vehicle_class = self.vehicle_class;
        // A stale return date left on a one-way form is not part of the booking
        summary.return_date = match (self.product, self.trip_type) {
            (Product::Hotel, _) => self.return_date,
            (_, Some(trip)) if trip.requires_return_leg() => self.return_date,
            _ => None,
        };
        Ok(summary)
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
