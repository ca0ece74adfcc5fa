pub mod distance;
pub mod pricing;

pub use distance::{DistanceLookup, RouteDistance, RouteError, StaticDistanceTable};
pub use pricing::{FareBreakdown, FareConfig, FareConfigError, FareError, FareEstimator};
