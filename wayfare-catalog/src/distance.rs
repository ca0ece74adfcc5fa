use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves the road distance between two places, in kilometres.
///
/// The estimator never guesses a distance itself; callers inject whichever
/// lookup they have (a static table, a routing service client, a test double).
pub trait DistanceLookup {
    fn lookup_distance(&self, origin: &str, destination: &str) -> Result<f64, RouteError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("No known route from {origin} to {destination}")]
    NotFound { origin: String, destination: String },
}

/// One configured route, as it appears in the config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteDistance {
    pub from: String,
    pub to: String,
    pub km: f64,
}

/// Fixed distance table. Routes are symmetric and names are matched
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticDistanceTable {
    routes: HashMap<(String, String), f64>,
}

impl StaticDistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_routes<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = RouteDistance>,
    {
        let mut table = Self::new();
        for route in routes {
            table.insert(&route.from, &route.to, route.km);
        }
        table
    }

    pub fn insert(&mut self, from: &str, to: &str, km: f64) {
        self.routes.insert(key(from, to), km);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl DistanceLookup for StaticDistanceTable {
    fn lookup_distance(&self, origin: &str, destination: &str) -> Result<f64, RouteError> {
        self.routes
            .get(&key(origin, destination))
            .copied()
            .ok_or_else(|| RouteError::NotFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }
}

fn key(a: &str, b: &str) -> (String, String) {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_symmetric() {
        let table = StaticDistanceTable::from_routes(vec![RouteDistance {
            from: "Delhi".to_string(),
            to: "Agra".to_string(),
            km: 233.0,
        }]);

        assert_eq!(table.lookup_distance("Delhi", "Agra"), Ok(233.0));
        assert_eq!(table.lookup_distance("agra", " DELHI "), Ok(233.0));
    }

    #[test]
    fn test_unknown_route() {
        let table = StaticDistanceTable::new();
        let err = table.lookup_distance("Delhi", "Goa").unwrap_err();
        assert_eq!(err.to_string(), "No known route from Delhi to Goa");
    }

    #[test]
    fn test_route_deserialization() {
        let json = r#"{ "from": "Mumbai", "to": "Pune", "km": 148.5 }"#;
        let route: RouteDistance = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(route.km, 148.5);
    }
}
