use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wayfare_shared::{TripType, UnknownVehicleClass, VehicleClass};

use crate::distance::{DistanceLookup, RouteError};

/// Fractions (tax rate, multipliers) are applied in basis points so that
/// rounding never depends on binary floating point.
const BASIS_POINTS: u64 = 10_000;

/// Upper bounds for the fractional constants. Tax beyond 100% or a round trip
/// costing more than two full legs is a configuration mistake.
const MAX_TAX_RATE: f64 = 1.0;
const MAX_ROUND_TRIP_MULTIPLIER: f64 = 2.0;

/// Business constants for taxi fares
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    /// Per-kilometre rate for each vehicle class (whole currency units)
    pub rates: HashMap<VehicleClass, u32>,

    /// Flat operator allowance for one-way and round trips
    pub standard_allowance: u64,

    /// Flat operator allowance for hourly rentals
    pub hourly_allowance: u64,

    /// Distances strictly above this many kilometres pay the toll charge
    pub toll_threshold_km: f64,

    pub toll_charge: u64,

    /// Tax applied to the pre-tax subtotal (0.05 = 5%)
    pub tax_rate: f64,

    /// Flat scaling for round trips; two legs less a discount, not a literal 2x
    pub round_trip_multiplier: f64,

    /// Average-speed heuristic for the duration estimate
    pub minutes_per_km: f64,

    pub currency: String,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            rates: {
                let mut m = HashMap::new();
                m.insert(VehicleClass::Hatchback, 12);
                m.insert(VehicleClass::Sedan, 15);
                m.insert(VehicleClass::Suv, 18);
                m.insert(VehicleClass::Luxury, 25);
                m
            },
            standard_allowance: 200,
            hourly_allowance: 500,
            toll_threshold_km: 30.0,
            toll_charge: 150,
            tax_rate: 0.05,
            round_trip_multiplier: 1.8,
            minutes_per_km: 1.5,
            currency: "INR".to_string(),
        }
    }
}

/// Itemized fare. `total` is derived from the other monetary fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub distance: f64,
    pub vehicle_class: VehicleClass,
    pub trip_type: TripType,
    pub base_fare: u64,
    pub fixed_allowance: u64,
    pub toll_charge: u64,
    pub tax: u64,
    pub total: u64,
    /// Minutes
    pub estimated_duration: u64,
    pub currency: String,
}

impl FareBreakdown {
    /// Single-leg amount before the trip-type multiplier
    pub fn subtotal(&self) -> u64 {
        self.base_fare + self.fixed_allowance + self.toll_charge + self.tax
    }
}

/// The estimator refuses to price rather than return a zero fare.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    #[error("Distance must be a positive number of kilometres, got {0}")]
    InvalidDistance(f64),

    #[error("No rate configured for vehicle class: {0}")]
    UnknownVehicleClass(String),

    #[error(transparent)]
    RouteNotFound(#[from] RouteError),

    #[error("Fare for {0} km exceeds the representable amount")]
    FareTooLarge(f64),
}

impl From<UnknownVehicleClass> for FareError {
    fn from(err: UnknownVehicleClass) -> Self {
        FareError::UnknownVehicleClass(err.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareConfigError {
    #[error("Rate for {higher} ({higher_rate}) must exceed rate for {lower} ({lower_rate})")]
    RatesNotIncreasing {
        lower: VehicleClass,
        lower_rate: u32,
        higher: VehicleClass,
        higher_rate: u32,
    },

    #[error("{0} must be a finite, non-negative number")]
    InvalidConstant(&'static str),

    #[error("Round-trip multiplier must be at least 1.0, got {0}")]
    MultiplierBelowOne(f64),

    #[error("{name} must not exceed {max}, got {value}")]
    ConstantTooLarge {
        name: &'static str,
        value: f64,
        max: f64,
    },
}

/// Deterministic taxi fare calculator
#[derive(Debug, Clone)]
pub struct FareEstimator {
    config: FareConfig,
    tax_bp: u64,
    round_trip_bp: u64,
}

impl Default for FareEstimator {
    fn default() -> Self {
        let config = FareConfig::default();
        Self {
            tax_bp: to_basis_points(config.tax_rate),
            round_trip_bp: to_basis_points(config.round_trip_multiplier),
            config,
        }
    }
}

impl FareEstimator {
    pub fn new(config: FareConfig) -> Result<Self, FareConfigError> {
        check_config(&config)?;
        Ok(Self {
            tax_bp: to_basis_points(config.tax_rate),
            round_trip_bp: to_basis_points(config.round_trip_multiplier),
            config,
        })
    }

    pub fn config(&self) -> &FareConfig {
        &self.config
    }

    pub fn rate(&self, vehicle_class: VehicleClass) -> Option<u32> {
        self.config.rates.get(&vehicle_class).copied()
    }

    /// Price a trip of a known distance
    pub fn estimate(
        &self,
        distance: f64,
        vehicle_class: VehicleClass,
        trip_type: TripType,
    ) -> Result<FareBreakdown, FareError> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(FareError::InvalidDistance(distance));
        }
        let rate = self
            .rate(vehicle_class)
            .ok_or_else(|| FareError::UnknownVehicleClass(vehicle_class.to_string()))?;

        let too_large = || FareError::FareTooLarge(distance);

        let base_fare = round_half_up(distance * rate as f64).ok_or_else(too_large)?;
        let fixed_allowance = match trip_type {
            TripType::Hourly => self.config.hourly_allowance,
            TripType::OneWay | TripType::RoundTrip => self.config.standard_allowance,
        };
        let toll_charge = if distance > self.config.toll_threshold_km {
            self.config.toll_charge
        } else {
            0
        };

        let pre_tax = base_fare
            .checked_add(fixed_allowance)
            .and_then(|sum| sum.checked_add(toll_charge))
            .ok_or_else(too_large)?;
        let tax = apply_basis_points(pre_tax, self.tax_bp).ok_or_else(too_large)?;
        let subtotal = pre_tax.checked_add(tax).ok_or_else(too_large)?;

        let total = match trip_type {
            TripType::RoundTrip => {
                apply_basis_points(subtotal, self.round_trip_bp).ok_or_else(too_large)?
            }
            TripType::OneWay | TripType::Hourly => subtotal,
        };
        let estimated_duration =
            round_half_up(distance * self.config.minutes_per_km).ok_or_else(too_large)?;

        Ok(FareBreakdown {
            distance,
            vehicle_class,
            trip_type,
            base_fare,
            fixed_allowance,
            toll_charge,
            tax,
            total,
            estimated_duration,
            currency: self.config.currency.clone(),
        })
    }

    /// Price a trip when the vehicle class arrives as free text
    pub fn estimate_named(
        &self,
        distance: f64,
        vehicle_class: &str,
        trip_type: TripType,
    ) -> Result<FareBreakdown, FareError> {
        let class: VehicleClass = vehicle_class.parse()?;
        self.estimate(distance, class, trip_type)
    }

    /// Resolve the distance through the injected lookup, then price it
    pub fn estimate_route(
        &self,
        lookup: &dyn DistanceLookup,
        origin: &str,
        destination: &str,
        vehicle_class: VehicleClass,
        trip_type: TripType,
    ) -> Result<FareBreakdown, FareError> {
        let distance = lookup.lookup_distance(origin, destination)?;
        self.estimate(distance, vehicle_class, trip_type)
    }
}

fn check_config(config: &FareConfig) -> Result<(), FareConfigError> {
    let priced: Vec<(VehicleClass, u32)> = VehicleClass::ALL
        .into_iter()
        .filter_map(|class| config.rates.get(&class).map(|rate| (class, *rate)))
        .collect();
    for pair in priced.windows(2) {
        let (lower, lower_rate) = pair[0];
        let (higher, higher_rate) = pair[1];
        if higher_rate <= lower_rate {
            return Err(FareConfigError::RatesNotIncreasing {
                lower,
                lower_rate,
                higher,
                higher_rate,
            });
        }
    }

    for (name, value) in [
        ("tax_rate", config.tax_rate),
        ("toll_threshold_km", config.toll_threshold_km),
        ("minutes_per_km", config.minutes_per_km),
        ("round_trip_multiplier", config.round_trip_multiplier),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(FareConfigError::InvalidConstant(name));
        }
    }
    if config.round_trip_multiplier < 1.0 {
        return Err(FareConfigError::MultiplierBelowOne(config.round_trip_multiplier));
    }
    for (name, value, max) in [
        ("tax_rate", config.tax_rate, MAX_TAX_RATE),
        ("round_trip_multiplier", config.round_trip_multiplier, MAX_ROUND_TRIP_MULTIPLIER),
    ] {
        if value > max {
            return Err(FareConfigError::ConstantTooLarge { name, value, max });
        }
    }
    Ok(())
}

fn to_basis_points(fraction: f64) -> u64 {
    (fraction * BASIS_POINTS as f64).round() as u64
}

/// amount x bp / 10_000, rounded half up. `None` on overflow.
fn apply_basis_points(amount: u64, bp: u64) -> Option<u64> {
    amount
        .checked_mul(bp)?
        .checked_add(BASIS_POINTS / 2)
        .map(|scaled| scaled / BASIS_POINTS)
}

/// `None` when the rounded value does not fit in a u64
fn round_half_up(value: f64) -> Option<u64> {
    let rounded = (value + 0.5).floor();
    // u64::MAX as f64 is 2^64, one past the largest u64
    if rounded < u64::MAX as f64 {
        Some(rounded as u64)
    } else {
        None
    }
}
