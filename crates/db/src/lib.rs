pub mod fixtures;
pub mod repositories;

pub use fixtures::{CatalogSeed, SeedError, SeedSummary};
pub use repositories::{InMemoryProductStore, InMemoryRebateStore};
