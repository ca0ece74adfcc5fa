use serde::{Deserialize, Serialize};
use wayfare_shared::{Product, TripType};

use crate::{CoreError, CoreResult};

/// Which passenger-count shape a product collects
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PassengerShape {
    /// adults / children / infants
    Breakdown,
    /// single head count
    Total,
}

/// When a return date (or check-out date) is mandatory
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReturnLegPolicy {
    #[default]
    ByTripType,
    Always,
    Never,
}

/// Product-specific wording for the errors the UI shows beside each input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuleMessages {
    pub trip_type_required: String,
    pub origin_required: String,
    pub destination_required: String,
    pub same_location: String,
    pub departure_required: String,
    pub departure_in_past: String,
    pub return_required: String,
    pub return_not_after_departure: String,
    pub passengers_required: String,
    pub passengers_minimum: String,
    pub contact_required: String,
    pub contact_invalid: String,
    pub vehicle_class_required: String,
}

impl Default for RuleMessages {
    fn default() -> Self {
        Self {
            trip_type_required: "Please select a trip type".to_string(),
            origin_required: "Please select departure city".to_string(),
            destination_required: "Please select destination city".to_string(),
            same_location: "Origin and destination cannot be the same".to_string(),
            departure_required: "Please select departure date".to_string(),
            departure_in_past: "Departure date cannot be in the past".to_string(),
            return_required: "Please select return date".to_string(),
            return_not_after_departure: "Return date must be after departure date".to_string(),
            passengers_required: "Please enter number of passengers".to_string(),
            passengers_minimum: "At least one passenger required".to_string(),
            contact_required: "Please enter contact number".to_string(),
            contact_invalid: "Please enter a valid 10-digit contact number".to_string(),
            vehicle_class_required: "Please select a vehicle".to_string(),
        }
    }
}

/// Rule configuration for one product's booking form.
///
/// One parameterized validator is driven by these flags instead of a
/// hand-written validator per page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSet {
    pub product: Product,
    #[serde(default)]
    pub allowed_trip_types: Vec<TripType>,
    #[serde(default)]
    pub require_trip_type: bool,
    #[serde(default = "default_true")]
    pub require_origin: bool,
    #[serde(default)]
    pub require_vehicle_class: bool,
    pub passenger_shape: PassengerShape,
    #[serde(default)]
    pub return_leg: ReturnLegPolicy,
    #[serde(default)]
    pub restrict_to_locations: bool,
    #[serde(default)]
    pub messages: RuleMessages,
}

fn default_true() -> bool {
    true
}

impl RuleSet {
    pub fn flight() -> Self {
        Self {
            product: Product::Flight,
            allowed_trip_types: vec![TripType::OneWay, TripType::RoundTrip],
            require_trip_type: true,
            require_origin: true,
            require_vehicle_class: false,
            passenger_shape: PassengerShape::Breakdown,
            return_leg: ReturnLegPolicy::ByTripType,
            restrict_to_locations: true,
            messages: RuleMessages {
                destination_required: "Please select arrival city".to_string(),
                ..RuleMessages::default()
            },
        }
    }

    pub fn taxi() -> Self {
        Self {
            product: Product::Taxi,
            allowed_trip_types: vec![TripType::OneWay, TripType::RoundTrip, TripType::Hourly],
            require_trip_type: true,
            require_origin: true,
            require_vehicle_class: true,
            passenger_shape: PassengerShape::Total,
            return_leg: ReturnLegPolicy::ByTripType,
            restrict_to_locations: false,
            messages: RuleMessages {
                origin_required: "Please enter pickup location".to_string(),
                destination_required: "Please enter drop location".to_string(),
                departure_required: "Please select pickup date".to_string(),
                departure_in_past: "Pickup date cannot be in the past".to_string(),
                same_location: "Pickup and drop locations cannot be the same".to_string(),
                ..RuleMessages::default()
            },
        }
    }

    /// Hotels map check-in and check-out onto the departure and return dates
    pub fn hotel() -> Self {
        Self {
            product: Product::Hotel,
            allowed_trip_types: Vec::new(),
            require_trip_type: false,
            require_origin: false,
            require_vehicle_class: false,
            passenger_shape: PassengerShape::Total,
            return_leg: ReturnLegPolicy::Always,
            restrict_to_locations: true,
            messages: RuleMessages {
                destination_required: "Please select a city".to_string(),
                departure_required: "Please select check-in date".to_string(),
                departure_in_past: "Check-in date cannot be in the past".to_string(),
                return_required: "Please select check-out date".to_string(),
                return_not_after_departure: "Check-out date must be after check-in date"
                    .to_string(),
                passengers_required: "Please enter number of guests".to_string(),
                passengers_minimum: "At least one guest required".to_string(),
                ..RuleMessages::default()
            },
        }
    }

    pub fn for_product(product: Product) -> Self {
        match product {
            Product::Flight => Self::flight(),
            Product::Hotel => Self::hotel(),
            Product::Taxi => Self::taxi(),
        }
    }

    /// Reject configurations no request could ever satisfy
    pub fn check(&self) -> CoreResult<()> {
        if self.require_trip_type && self.allowed_trip_types.is_empty() {
            return Err(CoreError::InvalidRuleSet(format!(
                "{} requires a trip type but allows none",
                self.product
            )));
        }
        Ok(())
    }

    /// Whether a request with this trip type must carry a return date
    pub fn needs_return_leg(&self, trip_type: Option<TripType>) -> bool {
        match self.return_leg {
            ReturnLegPolicy::Always => true,
            ReturnLegPolicy::Never => false,
            ReturnLegPolicy::ByTripType => {
                trip_type.map(|t| t.requires_return_leg()).unwrap_or(false)
            }
        }
    }
}
