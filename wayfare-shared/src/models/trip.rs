use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bookable product lines offered by the agency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Flight,
    Hotel,
    Taxi,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Product::Flight => "flight",
            Product::Hotel => "hotel",
            Product::Taxi => "taxi",
        };
        f.write_str(name)
    }
}

/// Classification of a trip. Drives which fields are required and how the fare is scaled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    RoundTrip,
    Hourly,
}

impl TripType {
    pub fn requires_return_leg(&self) -> bool {
        matches!(self, TripType::RoundTrip)
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TripType::OneWay => "one-way",
            TripType::RoundTrip => "round-trip",
            TripType::Hourly => "hourly",
        };
        f.write_str(name)
    }
}

/// Taxi vehicle tiers, declared from cheapest to most expensive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Hatchback,
    Sedan,
    Suv,
    Luxury,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 4] = [
        VehicleClass::Hatchback,
        VehicleClass::Sedan,
        VehicleClass::Suv,
        VehicleClass::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Hatchback => "hatchback",
            VehicleClass::Sedan => "sedan",
            VehicleClass::Suv => "suv",
            VehicleClass::Luxury => "luxury",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown vehicle class: {0}")]
pub struct UnknownVehicleClass(pub String);

impl FromStr for VehicleClass {
    type Err = UnknownVehicleClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        VehicleClass::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVehicleClass(s.to_string()))
    }
}
