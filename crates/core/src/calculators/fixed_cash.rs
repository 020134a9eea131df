use rust_decimal::Decimal;

use super::RebateCalculator;
use crate::domain::calculation::{CalculationOutcome, CalculationParameters};
use crate::domain::rebate::IncentiveType;
use crate::errors::RuleViolation;

/// Pays the rebate's fixed amount regardless of volume.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedCashAmountCalculator;

impl RebateCalculator for FixedCashAmountCalculator {
    fn can_calculate(&self, incentive: IncentiveType) -> bool {
        incentive == IncentiveType::FixedCashAmount
    }

    fn calculate(&self, parameters: &CalculationParameters) -> CalculationOutcome {
        match fixed_cash_amount(parameters) {
            Ok(amount) => CalculationOutcome::success(amount),
            Err(violation) => violation.into(),
        }
    }
}

pub fn fixed_cash_amount(parameters: &CalculationParameters) -> Result<Decimal, RuleViolation> {
    let CalculationParameters { rebate, product, .. } = parameters;

    if !product.supports(IncentiveType::FixedCashAmount) {
        return Err(RuleViolation::FixedCashAmountUnsupported);
    }
    if rebate.amount <= Decimal::ZERO {
        return Err(RuleViolation::NonPositiveAmount);
    }

    Ok(rebate.amount)
}
