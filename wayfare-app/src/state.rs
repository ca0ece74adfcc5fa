use std::collections::HashMap;
use std::sync::Arc;
use wayfare_catalog::{FareBreakdown, FareError, FareEstimator, StaticDistanceTable};
use wayfare_core::{BookingRequest, BookingValidator, CoreError, LocationSet, RuleSet};
use wayfare_shared::Product;

use crate::app_config::Config;
use crate::error::AppError;

/// Engine pieces shared by every form: one validator per product, the fare
/// estimator and the route table it prices against.
#[derive(Clone)]
pub struct AppState {
    validators: Arc<HashMap<Product, BookingValidator>>,
    pub estimator: Arc<FareEstimator>,
    pub distances: Arc<StaticDistanceTable>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let locations = LocationSet::new(config.locations.iter().cloned());

        let products = [Product::Flight, Product::Hotel, Product::Taxi];
        let mut rule_sets: HashMap<Product, RuleSet> = products
            .into_iter()
            .map(|product| (product, RuleSet::for_product(product)))
            .collect();
        for rules in &config.rules {
            rule_sets.insert(rules.product, rules.clone());
        }

        let mut validators = HashMap::new();
        for (product, rules) in rule_sets {
            rules.check()?;
            validators.insert(product, BookingValidator::new(rules, locations.clone()));
        }

        let estimator = FareEstimator::new(config.pricing.clone())?;
        let distances = StaticDistanceTable::from_routes(config.routes.iter().cloned());

        tracing::debug!(
            locations = locations.len(),
            routes = distances.len(),
            "booking engine configured"
        );

        Ok(Self {
            validators: Arc::new(validators),
            estimator: Arc::new(estimator),
            distances: Arc::new(distances),
        })
    }

    pub fn validator(&self, product: Product) -> Result<&BookingValidator, AppError> {
        self.validators.get(&product).ok_or_else(|| {
            AppError::Core(CoreError::InvalidRuleSet(format!("no rule set for {}", product)))
        })
    }

    /// Fare for a taxi request once every fare input is filled in.
    /// `None` means there is nothing to price yet.
    pub fn quote(&self, request: &BookingRequest) -> Option<Result<FareBreakdown, FareError>> {
        if request.product != Product::Taxi {
            return None;
        }
        let origin = request.origin.as_deref().map(str::trim).filter(|o| !o.is_empty())?;
        let destination = request.destination.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
        let vehicle_class = request.vehicle_class?;
        let trip_type = request.trip_type?;

        Some(self.estimator.estimate_route(
            self.distances.as_ref(),
            origin,
            destination,
            vehicle_class,
            trip_type,
        ))
    }
}
