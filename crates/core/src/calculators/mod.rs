pub mod amount_per_uom;
pub mod fixed_cash;
pub mod fixed_rate;

use std::fmt;

use crate::domain::calculation::{CalculationOutcome, CalculationParameters};
use crate::domain::rebate::IncentiveType;

pub use self::{
    amount_per_uom::AmountPerUomCalculator, fixed_cash::FixedCashAmountCalculator,
    fixed_rate::FixedRateRebateCalculator,
};

/// A stateless rule evaluator for one incentive kind.
pub trait RebateCalculator: Send + Sync {
    fn can_calculate(&self, incentive: IncentiveType) -> bool;

    fn calculate(&self, parameters: &CalculationParameters) -> CalculationOutcome;
}

/// Ordered set of calculators; selection returns the first one that claims
/// the incentive kind.
pub struct CalculatorRegistry {
    calculators: Vec<Box<dyn RebateCalculator>>,
}

impl CalculatorRegistry {
    pub fn new(calculators: Vec<Box<dyn RebateCalculator>>) -> Self {
        Self { calculators }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn register(mut self, calculator: impl RebateCalculator + 'static) -> Self {
        self.calculators.push(Box::new(calculator));
        self
    }

    pub fn select(&self, incentive: IncentiveType) -> Option<&dyn RebateCalculator> {
        self.calculators
            .iter()
            .find(|calculator| calculator.can_calculate(incentive))
            .map(|calculator| &**calculator)
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        Self::empty()
            .register(FixedCashAmountCalculator)
            .register(FixedRateRebateCalculator)
            .register(AmountPerUomCalculator)
    }
}

impl fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorRegistry").field("calculators", &self.calculators.len()).finish()
    }
}
