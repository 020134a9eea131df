use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use rebate_core::domain::product::Product;
use rebate_core::domain::rebate::Rebate;

use crate::repositories::{InMemoryProductStore, InMemoryRebateStore};

/// Identifiers the built-in catalog is guaranteed to contain.
pub const DEFAULT_REBATE_IDS: &[&str] = &["REB-1", "REB-2", "REB-3"];
pub const DEFAULT_PRODUCT_IDS: &[&str] = &["PROD-1", "PROD-2"];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog `{origin}`: {source}")]
    Parse { origin: String, source: toml::de::Error },
    #[error("invalid catalog `{origin}`: {message}")]
    Invalid { origin: String, message: String },
}

/// Rebate and product reference data loaded into the in-memory stores.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub rebates: Vec<Rebate>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub rebates: usize,
    pub products: usize,
}

impl CatalogSeed {
    pub const DEFAULT_TOML: &'static str =
        include_str!("../../../config/fixtures/default_catalog.toml");

    pub fn default_dataset() -> Result<Self, SeedError> {
        Self::parse(Self::DEFAULT_TOML, "built-in")
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| SeedError::ReadFile { path: path.to_path_buf(), source })?;
        Self::parse(&raw, &path.display().to_string())
    }

    /// The configured catalog file, or the built-in dataset when none is set.
    pub fn resolve(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::default_dataset(),
        }
    }

    pub fn parse(raw: &str, origin: &str) -> Result<Self, SeedError> {
        let seed = toml::from_str::<Self>(raw)
            .map_err(|source| SeedError::Parse { origin: origin.to_string(), source })?;
        seed.validate()
            .map_err(|message| SeedError::Invalid { origin: origin.to_string(), message })?;
        Ok(seed)
    }

    fn validate(&self) -> Result<(), String> {
        let mut rebate_ids = HashSet::new();
        for rebate in &self.rebates {
            let id = rebate.id.0.trim();
            if id.is_empty() {
                return Err("rebate id must not be blank".to_string());
            }
            if !rebate_ids.insert(id) {
                return Err(format!("duplicate rebate id `{id}`"));
            }
            if rebate.amount < Decimal::ZERO {
                return Err(format!("rebate `{id}` has a negative amount"));
            }
            if rebate.percentage < Decimal::ZERO {
                return Err(format!("rebate `{id}` has a negative percentage"));
            }
        }

        let mut product_ids = HashSet::new();
        for product in &self.products {
            let id = product.id.0.trim();
            if id.is_empty() {
                return Err("product id must not be blank".to_string());
            }
            if !product_ids.insert(id) {
                return Err(format!("duplicate product id `{id}`"));
            }
            if product.price < Decimal::ZERO {
                return Err(format!("product `{id}` has a negative price"));
            }
        }

        Ok(())
    }

    pub fn apply(
        &self,
        rebates: &InMemoryRebateStore,
        products: &InMemoryProductStore,
    ) -> SeedSummary {
        for rebate in &self.rebates {
            rebates.insert(rebate.clone());
        }
        for product in &self.products {
            products.insert(product.clone());
        }

        let summary = SeedSummary { rebates: self.rebates.len(), products: self.products.len() };
        info!(
            event_name = "catalog.seed.applied",
            rebates = summary.rebates,
            products = summary.products,
            "catalog seeded into in-memory stores"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use rebate_core::domain::product::ProductId;
    use rebate_core::domain::rebate::{IncentiveType, RebateId};
    use rebate_core::store::{ProductStore, RebateStore};

    use super::{CatalogSeed, SeedError};
    use crate::repositories::{InMemoryProductStore, InMemoryRebateStore};

    #[test]
    fn default_dataset_parses() {
        let seed = CatalogSeed::default_dataset().expect("built-in catalog parses");

        assert_eq!(seed.rebates.len(), 3);
        assert_eq!(seed.products.len(), 2);
        let reb2 = seed.rebates.iter().find(|rebate| rebate.id.0 == "REB-2").expect("REB-2");
        assert_eq!(reb2.incentive, IncentiveType::FixedRateRebate);
        assert_eq!(reb2.percentage, Decimal::new(1, 1));
    }

    #[test]
    fn apply_populates_both_stores() {
        let rebates = InMemoryRebateStore::default();
        let products = InMemoryProductStore::default();

        let seed = CatalogSeed::default_dataset().expect("built-in catalog");
        let summary = seed.apply(&rebates, &products);

        assert_eq!((summary.rebates, summary.products), (3, 2));
        assert!(rebates.find_by_id(&RebateId("REB-3".to_string())).is_some());
        let prod1 = products.find_by_id(&ProductId("PROD-1".to_string())).expect("PROD-1");
        assert!(prod1.supports(IncentiveType::FixedCashAmount));
        assert!(prod1.supports(IncentiveType::FixedRateRebate));
        assert!(!prod1.supports(IncentiveType::AmountPerUom));
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let raw = r#"
[[products]]
id = "P"
price = "1"
uom = "EA"

[[products]]
id = "P"
price = "2"
uom = "EA"
"#;

        let error = CatalogSeed::parse(raw, "test").expect_err("duplicate product id");

        assert!(matches!(
            error,
            SeedError::Invalid { ref message, .. } if message.contains("duplicate product id `P`")
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let raw = r#"
[[products]]
id = "P"
price = "-1"
uom = "EA"
supported_incentives = ["AmountPerUom"]
"#;

        let error = CatalogSeed::parse(raw, "test").expect_err("negative price");

        assert!(matches!(
            error,
            SeedError::Invalid { ref message, .. } if message.contains("negative price")
        ));
    }

    #[test]
    fn unknown_incentive_is_a_parse_error() {
        let raw = r#"
[[rebates]]
id = "R"
incentive = "BuyOneGetOne"
"#;

        let error = CatalogSeed::parse(raw, "test").expect_err("unknown incentive");

        assert!(matches!(error, SeedError::Parse { ref origin, .. } if origin == "test"));
    }
}
