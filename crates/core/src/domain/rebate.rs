use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RebateId(pub String);

impl fmt::Display for RebateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a rebate amount is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncentiveType {
    FixedCashAmount,
    FixedRateRebate,
    AmountPerUom,
}

impl IncentiveType {
    pub const ALL: [IncentiveType; 3] =
        [Self::FixedCashAmount, Self::FixedRateRebate, Self::AmountPerUom];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FixedCashAmount => "FixedCashAmount",
            Self::FixedRateRebate => "FixedRateRebate",
            Self::AmountPerUom => "AmountPerUom",
        }
    }
}

impl fmt::Display for IncentiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebate {
    pub id: RebateId,
    pub incentive: IncentiveType,
    /// Fixed cash amount, or the amount per unit of measure.
    #[serde(default)]
    pub amount: Decimal,
    /// Fraction of the product price, e.g. `0.1` for ten percent.
    #[serde(default)]
    pub percentage: Decimal,
}

#[cfg(test)]
mod tests {
    use super::IncentiveType;

    #[test]
    fn incentive_display_uses_variant_names() {
        let rendered: Vec<String> = IncentiveType::ALL.iter().map(ToString::to_string).collect();

        assert_eq!(rendered, vec!["FixedCashAmount", "FixedRateRebate", "AmountPerUom"]);
    }
}
