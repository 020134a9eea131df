pub mod calculate;
pub mod catalog;
pub mod config;

use rebate_core::config::{AppConfig, LoadOptions};
use rebate_db::{CatalogSeed, InMemoryProductStore, InMemoryRebateStore, SeedSummary};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome<D = ()> {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<D>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None::<()>)
    }

    /// A successful outcome carrying a structured `data` payload.
    pub fn success_with_data<D: Serialize>(
        command: &str,
        message: impl Into<String>,
        data: Option<D>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload: CommandOutcome = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload<D: Serialize>(payload: CommandOutcome<D>) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Stores populated from the configured catalog.
struct SeededStores {
    rebates: InMemoryRebateStore,
    products: InMemoryProductStore,
    summary: SeedSummary,
}

/// Loads config and seeds fresh stores, mapping each failure to the
/// `(error_class, message, exit_code)` triple the commands report.
fn seeded_stores(options: &LoadOptions) -> Result<SeededStores, (&'static str, String, u8)> {
    let config = AppConfig::load(options.clone())
        .map_err(|error| ("config_validation", format!("configuration issue: {error}"), 2u8))?;

    let seed = CatalogSeed::resolve(config.catalog.path.as_deref())
        .map_err(|error| ("catalog_load", error.to_string(), 3u8))?;

    let rebates = InMemoryRebateStore::default();
    let products = InMemoryProductStore::default();
    let summary = seed.apply(&rebates, &products);

    Ok(SeededStores { rebates, products, summary })
}
