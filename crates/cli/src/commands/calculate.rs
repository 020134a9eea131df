use rebate_core::config::LoadOptions;
use rebate_core::{CalculationRequest, RebateService};
use rust_decimal::Decimal;

use super::{seeded_stores, CommandResult};

#[derive(Debug, Clone)]
pub struct CalculateArgs {
    pub rebate_id: String,
    pub product_id: String,
    pub volume: Option<Decimal>,
}

pub fn run(options: &LoadOptions, args: CalculateArgs) -> CommandResult {
    let stores = match seeded_stores(options) {
        Ok(stores) => stores,
        Err((error_class, message, exit_code)) => {
            return CommandResult::failure("calculate", error_class, message, exit_code);
        }
    };

    let rebate_id = args.rebate_id.trim();
    let product_id = args.product_id.trim();
    let request = match CalculationRequest::new(rebate_id, product_id, args.volume) {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::failure(
                "calculate",
                "invalid_input",
                format!("Invalid input: {error}"),
                4,
            );
        }
    };

    let service = RebateService::with_default_calculators(&stores.rebates, &stores.products);
    let result = service.calculate(&request);

    if result.success {
        CommandResult::success("calculate", "Calculation succeeded!")
    } else {
        let reason = result.error_message.unwrap_or_else(|| "Calculation failed".to_string());
        CommandResult::failure("calculate", "calculation_failed", reason, 1)
    }
}
