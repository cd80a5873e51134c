//! Installer configuration.
//!
//! Layered as: built-in defaults, then an optional JSON file named by
//! `SHOPSEED_CONFIG`, then individual `SHOPSEED_*` environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopseed_catalog::DEFAULT_ATTRIBUTE_SET_NAME;
use shopseed_core::{AttributeSetId, CategoryId, Price, Sku, SourceCode};
use shopseed_inventory::DEFAULT_SOURCE_CODE;

pub const CONFIG_PATH_VAR: &str = "SHOPSEED_CONFIG";
pub const SKU_VAR: &str = "SHOPSEED_SKU";
pub const STOCK_QTY_VAR: &str = "SHOPSEED_STOCK_QTY";
pub const SOURCE_QTY_VAR: &str = "SHOPSEED_SOURCE_QTY";
pub const ATTRIBUTE_SET_ID_VAR: &str = "SHOPSEED_ATTRIBUTE_SET_ID";
pub const ATTRIBUTE_SET_NAME_VAR: &str = "SHOPSEED_ATTRIBUTE_SET_NAME";
pub const CONTEXT_MODE_VAR: &str = "SHOPSEED_CONTEXT_MODE";
pub const COMPENSATE_VAR: &str = "SHOPSEED_COMPENSATE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {var} ({value:?}): {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} and {1} are mutually exclusive")]
    Conflict(&'static str, &'static str),
}

/// How the product's attribute set is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSetSource {
    /// Resolve by name for the product entity type at run time.
    ByName(String),
    /// Use a known id without a lookup.
    Fixed(AttributeSetId),
}

impl Default for AttributeSetSource {
    fn default() -> Self {
        AttributeSetSource::ByName(DEFAULT_ATTRIBUTE_SET_NAME.to_string())
    }
}

/// How the seed task obtains its admin execution context.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// Scoped switch to the admin area, restored afterwards.
    #[default]
    Emulate,
    /// Set the process area once; an already-set area is kept as is.
    SetAreaCode,
}

impl core::str::FromStr for ContextMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "emulate" => Ok(ContextMode::Emulate),
            "set_area_code" => Ok(ContextMode::SetAreaCode),
            other => Err(format!("expected 'emulate' or 'set_area_code', got '{other}'")),
        }
    }
}

/// Values the seed task writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedProductConfig {
    pub sku: Sku,
    pub name: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub attribute_set: AttributeSetSource,
    /// Quantity on the product's own stock data.
    pub stock_quantity: u32,
    pub source_code: SourceCode,
    /// Quantity on the source item; falls back to `stock_quantity`.
    pub source_quantity: Option<u32>,
    pub context_mode: ContextMode,
    /// Delete the product again if its source item cannot be saved.
    pub compensate_on_inventory_failure: bool,
}

impl SeedProductConfig {
    pub fn source_quantity(&self) -> u32 {
        self.source_quantity.unwrap_or(self.stock_quantity)
    }
}

impl Default for SeedProductConfig {
    fn default() -> Self {
        Self {
            sku: Sku::from_static("simple-product"),
            name: "Simple Product".to_string(),
            price: Price::from_minor_units(5000),
            category_id: CategoryId::new(2),
            attribute_set: AttributeSetSource::default(),
            stock_quantity: 100,
            source_code: SourceCode::from_static(DEFAULT_SOURCE_CODE),
            source_quantity: None,
            context_mode: ContextMode::default(),
            compensate_on_inventory_failure: true,
        }
    }
}

/// Top-level installer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    pub seed_product: SeedProductConfig,
}

impl InstallerConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let seed = &mut self.seed_product;

        if let Some(raw) = lookup(SKU_VAR) {
            seed.sku = Sku::new(raw.clone()).map_err(|e| invalid(SKU_VAR, raw, e))?;
        }
        if let Some(raw) = lookup(STOCK_QTY_VAR) {
            seed.stock_quantity = parse_u32(STOCK_QTY_VAR, raw)?;
        }
        if let Some(raw) = lookup(SOURCE_QTY_VAR) {
            seed.source_quantity = Some(parse_u32(SOURCE_QTY_VAR, raw)?);
        }

        match (lookup(ATTRIBUTE_SET_ID_VAR), lookup(ATTRIBUTE_SET_NAME_VAR)) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflict(ATTRIBUTE_SET_ID_VAR, ATTRIBUTE_SET_NAME_VAR));
            }
            (Some(raw), None) => {
                let id = raw
                    .parse::<AttributeSetId>()
                    .map_err(|e| invalid(ATTRIBUTE_SET_ID_VAR, raw, e))?;
                seed.attribute_set = AttributeSetSource::Fixed(id);
            }
            (None, Some(name)) => {
                if name.trim().is_empty() {
                    return Err(invalid(ATTRIBUTE_SET_NAME_VAR, name, "cannot be empty"));
                }
                seed.attribute_set = AttributeSetSource::ByName(name);
            }
            (None, None) => {}
        }

        if let Some(raw) = lookup(CONTEXT_MODE_VAR) {
            seed.context_mode = raw
                .parse::<ContextMode>()
                .map_err(|e| invalid(CONTEXT_MODE_VAR, raw, e))?;
        }
        if let Some(raw) = lookup(COMPENSATE_VAR) {
            seed.compensate_on_inventory_failure = match raw.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => return Err(invalid(COMPENSATE_VAR, raw, "expected true or false")),
            };
        }
        Ok(())
    }
}

fn parse_u32(var: &'static str, raw: String) -> Result<u32, ConfigError> {
    raw.trim().parse::<u32>().map_err(|e| invalid(var, raw, e))
}

fn invalid(var: &'static str, value: String, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_describe_the_demo_product() {
        let config = InstallerConfig::load_with(lookup(&[])).unwrap();
        let seed = config.seed_product;
        assert_eq!(seed.sku.as_str(), "simple-product");
        assert_eq!(seed.name, "Simple Product");
        assert_eq!(seed.price.to_string(), "50.00");
        assert_eq!(seed.category_id, CategoryId::new(2));
        assert_eq!(seed.attribute_set, AttributeSetSource::ByName("Default".to_string()));
        assert_eq!(seed.stock_quantity, 100);
        assert_eq!(seed.source_quantity(), 100);
        assert_eq!(seed.source_code.as_str(), "default");
        assert_eq!(seed.context_mode, ContextMode::Emulate);
        assert!(seed.compensate_on_inventory_failure);
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config = InstallerConfig::from_json_str(
            r#"{ "seed_product": { "attribute_set": { "fixed": 4 }, "source_quantity": 90 } }"#,
        )
        .unwrap();
        let seed = config.seed_product;
        assert_eq!(seed.attribute_set, AttributeSetSource::Fixed(AttributeSetId::new(4)));
        assert_eq!(seed.source_quantity(), 90);
        assert_eq!(seed.stock_quantity, 100);
        assert_eq!(seed.name, "Simple Product");
    }

    #[test]
    fn json_price_accepts_numbers_and_strings() {
        let from_number =
            InstallerConfig::from_json_str(r#"{ "seed_product": { "price": 12.5 } }"#).unwrap();
        let from_string =
            InstallerConfig::from_json_str(r#"{ "seed_product": { "price": "12.50" } }"#).unwrap();
        assert_eq!(from_number.seed_product.price, from_string.seed_product.price);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = InstallerConfig::from_json_str(r#"{ "seed_product": { "colour": "red" } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn negative_price_in_json_is_rejected() {
        assert!(InstallerConfig::from_json_str(r#"{ "seed_product": { "price": "-1" } }"#).is_err());
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let config = InstallerConfig::load_with(lookup(&[
            (SKU_VAR, "demo-sku"),
            (SOURCE_QTY_VAR, "90"),
            (ATTRIBUTE_SET_ID_VAR, "4"),
            (CONTEXT_MODE_VAR, "set_area_code"),
            (COMPENSATE_VAR, "false"),
        ]))
        .unwrap();
        let seed = config.seed_product;
        assert_eq!(seed.sku.as_str(), "demo-sku");
        assert_eq!(seed.source_quantity(), 90);
        assert_eq!(seed.stock_quantity, 100);
        assert_eq!(seed.attribute_set, AttributeSetSource::Fixed(AttributeSetId::new(4)));
        assert_eq!(seed.context_mode, ContextMode::SetAreaCode);
        assert!(!seed.compensate_on_inventory_failure);
    }

    #[test]
    fn invalid_env_values_name_the_variable() {
        let err = InstallerConfig::load_with(lookup(&[(STOCK_QTY_VAR, "-5")])).unwrap_err();
        match err {
            ConfigError::InvalidValue { var, value, .. } => {
                assert_eq!(var, STOCK_QTY_VAR);
                assert_eq!(value, "-5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn attribute_set_id_and_name_conflict() {
        let err = InstallerConfig::load_with(lookup(&[
            (ATTRIBUTE_SET_ID_VAR, "4"),
            (ATTRIBUTE_SET_NAME_VAR, "Default"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict(_, _)));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = InstallerConfig::load_with(lookup(&[(CONFIG_PATH_VAR, "/nonexistent/shopseed.json")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
