use serde::Deserialize;
use std::env;
use wayfare_catalog::{FareConfig, RouteDistance};
use wayfare_core::RuleSet;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub pricing: FareConfig,
    /// Cities offered in the flight and hotel pickers
    pub locations: Vec<String>,
    /// Known taxi route distances
    pub routes: Vec<RouteDistance>,
    /// Per-product overrides of the built-in rule sets
    pub rules: Vec<RuleSet>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment and local files are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `WAYFARE__PRICING__TOLL_CHARGE=175`
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document directly, without files or environment
    pub fn from_toml_str(raw: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
