use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::trip::{Product, TripType, VehicleClass};

/// Finalized booking handed to the messaging composer after validation.
/// The `Display` rendering is the message body the composer sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub reference: Uuid,
    pub product: Product,
    pub trip_type: Option<TripType>,
    pub origin: Option<String>,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    /// Human readable party size, e.g. "2 adults, 1 infant"
    pub travellers: String,
    pub vehicle_class: Option<VehicleClass>,
    pub contact_number: String,
    pub fare_total: Option<u64>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BookingSummary {
    pub fn new(
        product: Product,
        destination: String,
        departure_date: NaiveDate,
        travellers: String,
        contact_number: String,
    ) -> Self {
        Self {
            reference: Uuid::new_v4(),
            product,
            trip_type: None,
            origin: None,
            destination,
            departure_date,
            return_date: None,
            travellers,
            vehicle_class: None,
            contact_number,
            fare_total: None,
            currency: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the quoted amount due
    pub fn with_fare(mut self, total: u64, currency: impl Into<String>) -> Self {
        self.fare_total = Some(total);
        self.currency = Some(currency.into());
        self
    }

    fn heading(&self) -> &'static str {
        match self.product {
            Product::Flight => "Flight Booking Request",
            Product::Hotel => "Hotel Booking Request",
            Product::Taxi => "Taxi Booking Request",
        }
    }
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading())?;
        writeln!(f, "Reference: {}", self.reference)?;
        if let Some(trip_type) = self.trip_type {
            writeln!(f, "Trip: {}", trip_type)?;
        }
        match (&self.origin, self.product) {
            (Some(origin), _) => writeln!(f, "Route: {} -> {}", origin, self.destination)?,
            (None, Product::Hotel) => writeln!(f, "City: {}", self.destination)?,
            (None, _) => writeln!(f, "Destination: {}", self.destination)?,
        }
        let (outbound, inbound) = match self.product {
            Product::Hotel => ("Check-in", "Check-out"),
            _ => ("Departure", "Return"),
        };
        writeln!(f, "{}: {}", outbound, self.departure_date)?;
        if let Some(return_date) = self.return_date {
            writeln!(f, "{}: {}", inbound, return_date)?;
        }
        writeln!(f, "Travellers: {}", self.travellers)?;
        if let Some(class) = self.vehicle_class {
            writeln!(f, "Vehicle: {}", class)?;
        }
        if let (Some(total), Some(currency)) = (self.fare_total, &self.currency) {
            writeln!(f, "Estimated fare: {} {}", currency, total)?;
        }
        write!(f, "Contact: {}", self.contact_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxi_summary() -> BookingSummary {
        let mut summary = BookingSummary::new(
            Product::Taxi,
            "Agra".to_string(),
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            "3 passengers".to_string(),
            "9876543210".to_string(),
        );
        summary.origin = Some("Delhi".to_string());
        summary.trip_type = Some(TripType::RoundTrip);
        summary.return_date = NaiveDate::from_ymd_opt(2026, 11, 4);
        summary.vehicle_class = Some(VehicleClass::Suv);
        summary
    }

    #[test]
    fn test_taxi_summary_message() {
        let message = taxi_summary().with_fare(1796, "INR").to_string();

        assert!(message.starts_with("Taxi Booking Request\n"));
        assert!(message.contains("Trip: round-trip\n"));
        assert!(message.contains("Route: Delhi -> Agra\n"));
        assert!(message.contains("Departure: 2026-11-02\n"));
        assert!(message.contains("Return: 2026-11-04\n"));
        assert!(message.contains("Vehicle: suv\n"));
        assert!(message.contains("Estimated fare: INR 1796\n"));
        assert!(message.ends_with("Contact: 9876543210"));
    }

    #[test]
    fn test_hotel_summary_uses_stay_labels() {
        let mut summary = BookingSummary::new(
            Product::Hotel,
            "Goa".to_string(),
            NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            "2 guests".to_string(),
            "9876543210".to_string(),
        );
        summary.return_date = NaiveDate::from_ymd_opt(2026, 12, 24);
        let message = summary.to_string();

        assert!(message.contains("City: Goa\n"));
        assert!(message.contains("Check-in: 2026-12-20\n"));
        assert!(message.contains("Check-out: 2026-12-24\n"));
        assert!(!message.contains("Estimated fare"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_value(taxi_summary()).unwrap();
        assert_eq!(json["departureDate"], "2026-11-02");
        assert_eq!(json["vehicleClass"], "suv");
        assert!(json["fareTotal"].is_null());
    }
}
