use rust_decimal::Decimal;

use super::RebateCalculator;
use crate::domain::calculation::{CalculationOutcome, CalculationParameters};
use crate::domain::rebate::IncentiveType;
use crate::errors::RuleViolation;

/// Pays a percentage of the product price for every unit purchased.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRateRebateCalculator;

impl RebateCalculator for FixedRateRebateCalculator {
    fn can_calculate(&self, incentive: IncentiveType) -> bool {
        incentive == IncentiveType::FixedRateRebate
    }

    fn calculate(&self, parameters: &CalculationParameters) -> CalculationOutcome {
        match fixed_rate_amount(parameters) {
            Ok(amount) => CalculationOutcome::success(amount),
            Err(violation) => violation.into(),
        }
    }
}

/// `price * percentage * volume`, after validating in a fixed order.
pub fn fixed_rate_amount(parameters: &CalculationParameters) -> Result<Decimal, RuleViolation> {
    let CalculationParameters { rebate, product, volume } = parameters;

    let volume = volume.ok_or(RuleViolation::FixedRateVolumeRequired)?;
    if volume <= Decimal::ZERO {
        return Err(RuleViolation::NonPositiveVolume);
    }
    if !product.supports(IncentiveType::FixedRateRebate) {
        return Err(RuleViolation::FixedRateRebateUnsupported);
    }
    if rebate.percentage <= Decimal::ZERO {
        return Err(RuleViolation::NonPositivePercentage);
    }
    if product.price <= Decimal::ZERO {
        return Err(RuleViolation::NonPositivePrice);
    }

    product
        .price
        .checked_mul(rebate.percentage)
        .and_then(|unit_rebate| unit_rebate.checked_mul(volume))
        .ok_or(RuleViolation::AmountOutOfRange)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::FixedRateRebateCalculator;
    use crate::calculators::fixtures::{parameters, product, rebate};
    use crate::calculators::RebateCalculator;
    use crate::domain::calculation::CalculationOutcome;
    use crate::domain::product::SupportedIncentives;
    use crate::domain::rebate::IncentiveType;

    fn rate(percentage: Decimal, price: Decimal, volume: Option<Decimal>) -> CalculationOutcome {
        rate_for(percentage, price, SupportedIncentives::FIXED_RATE_REBATE, volume)
    }

    fn rate_for(
        percentage: Decimal,
        price: Decimal,
        supported: SupportedIncentives,
        volume: Option<Decimal>,
    ) -> CalculationOutcome {
        FixedRateRebateCalculator.calculate(&parameters(
            rebate(IncentiveType::FixedRateRebate, Decimal::ZERO, percentage),
            product(price, supported),
            volume,
        ))
    }

    #[test]
    fn handles_only_fixed_rate_rebate() {
        let calculator = FixedRateRebateCalculator;

        assert!(calculator.can_calculate(IncentiveType::FixedRateRebate));
        assert!(!calculator.can_calculate(IncentiveType::FixedCashAmount));
        assert!(!calculator.can_calculate(IncentiveType::AmountPerUom));
    }

    #[test]
    fn multiplies_price_percentage_and_volume() {
        let outcome = rate(Decimal::new(1, 1), Decimal::TEN, Some(Decimal::new(5, 0)));

        assert!(outcome.is_success());
        assert_eq!(outcome.amount(), Some(Decimal::new(50, 1)));
    }

    #[test]
    fn keeps_fractional_precision() {
        let outcome = rate(Decimal::new(125, 3), Decimal::new(1999, 2), Some(Decimal::new(3, 0)));

        // 19.99 * 0.125 * 3
        assert_eq!(outcome.amount(), Some(Decimal::new(7_49625, 5)));
    }

    #[test]
    fn requires_volume() {
        let outcome = rate(Decimal::new(1, 1), Decimal::TEN, None);

        assert_eq!(outcome.reason(), Some("Volume is required for Fixed Rate Rebate calculation"));
    }

    #[test]
    fn rejects_zero_and_negative_volume() {
        for volume in [Decimal::ZERO, Decimal::NEGATIVE_ONE] {
            let outcome = rate(Decimal::new(1, 1), Decimal::TEN, Some(volume));

            let reason = outcome.reason();
            assert_eq!(reason, Some("Volume must be greater than zero"), "volume {volume}");
        }
    }

    #[test]
    fn rejects_unsupported_product() {
        let outcome = rate_for(
            Decimal::new(1, 1),
            Decimal::TEN,
            SupportedIncentives::FIXED_CASH_AMOUNT,
            Some(Decimal::TEN),
        );

        assert_eq!(outcome.reason(), Some("Product does not support Fixed Rate Rebate incentive"));
    }

    #[test]
    fn rejects_zero_percentage() {
        let outcome = rate(Decimal::ZERO, Decimal::TEN, Some(Decimal::TEN));

        assert_eq!(outcome.reason(), Some("Rebate percentage must be greater than zero"));
    }

    #[test]
    fn rejects_zero_price() {
        let outcome = rate(Decimal::new(1, 1), Decimal::ZERO, Some(Decimal::TEN));

        assert_eq!(outcome.reason(), Some("Product price must be greater than zero"));
    }

    #[test]
    fn volume_is_checked_before_product_support() {
        let outcome = rate_for(Decimal::ZERO, Decimal::ZERO, SupportedIncentives::NONE, None);

        assert_eq!(outcome.reason(), Some("Volume is required for Fixed Rate Rebate calculation"));
    }

    #[test]
    fn overflowing_amount_is_a_failure_outcome() {
        let outcome = rate(Decimal::ONE, Decimal::TEN, Some(Decimal::MAX));

        assert!(!outcome.is_success());
        assert_eq!(outcome.reason(), Some("Rebate amount is out of range"));
    }

    #[test]
    fn percentage_is_checked_before_price() {
        let outcome = rate(Decimal::ZERO, Decimal::ZERO, Some(Decimal::ONE));

        assert_eq!(outcome.reason(), Some("Rebate percentage must be greater than zero"));
    }
}
