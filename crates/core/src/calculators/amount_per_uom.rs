use rust_decimal::Decimal;

use super::RebateCalculator;
use crate::domain::calculation::{CalculationOutcome, CalculationParameters};
use crate::domain::rebate::IncentiveType;
use crate::errors::RuleViolation;

/// Pays the rebate amount once per unit of measure.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmountPerUomCalculator;

impl RebateCalculator for AmountPerUomCalculator {
    fn can_calculate(&self, incentive: IncentiveType) -> bool {
        incentive == IncentiveType::AmountPerUom
    }

    fn calculate(&self, parameters: &CalculationParameters) -> CalculationOutcome {
        match amount_per_uom(parameters) {
            Ok(amount) => CalculationOutcome::success(amount),
            Err(violation) => violation.into(),
        }
    }
}

pub fn amount_per_uom(parameters: &CalculationParameters) -> Result<Decimal, RuleViolation> {
    let CalculationParameters { rebate, product, volume } = parameters;

    let volume = volume.ok_or(RuleViolation::AmountPerUomVolumeRequired)?;
    if volume <= Decimal::ZERO {
        return Err(RuleViolation::NonPositiveVolume);
    }
    if !product.supports(IncentiveType::AmountPerUom) {
        return Err(RuleViolation::AmountPerUomUnsupported);
    }
    if rebate.amount <= Decimal::ZERO {
        return Err(RuleViolation::NonPositiveAmount);
    }

    rebate.amount.checked_mul(volume).ok_or(RuleViolation::AmountOutOfRange)
}
