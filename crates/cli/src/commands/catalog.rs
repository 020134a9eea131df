use rebate_core::config::LoadOptions;
use rebate_core::{Product, Rebate};
use serde::Serialize;

use super::{seeded_stores, CommandResult};

/// Reference data listed by `rebate catalog`, sorted by identifier.
#[derive(Debug, Serialize)]
struct CatalogListing {
    rebates: Vec<Rebate>,
    products: Vec<Product>,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let stores = match seeded_stores(options) {
        Ok(stores) => stores,
        Err((error_class, message, exit_code)) => {
            return CommandResult::failure("catalog", error_class, message, exit_code);
        }
    };

    let message = format!(
        "catalog lists {} rebates and {} products",
        stores.summary.rebates, stores.summary.products
    );
    let listing =
        CatalogListing { rebates: stores.rebates.rebates(), products: stores.products.products() };

    CommandResult::success_with_data("catalog", message, Some(listing))
}
