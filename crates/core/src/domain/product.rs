use std::fmt;
use std::ops::BitOr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::rebate::IncentiveType;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bitset of the incentive kinds a product accepts.
///
/// Serialized as a list of incentive names so catalog files stay readable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<IncentiveType>", into = "Vec<IncentiveType>")]
pub struct SupportedIncentives(u8);

impl SupportedIncentives {
    pub const NONE: Self = Self(0);
    pub const FIXED_CASH_AMOUNT: Self = Self::only(IncentiveType::FixedCashAmount);
    pub const FIXED_RATE_REBATE: Self = Self::only(IncentiveType::FixedRateRebate);
    pub const AMOUNT_PER_UOM: Self = Self::only(IncentiveType::AmountPerUom);

    pub const fn only(incentive: IncentiveType) -> Self {
        Self(flag(incentive))
    }

    pub const fn supports(self, incentive: IncentiveType) -> bool {
        self.0 & flag(incentive) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = IncentiveType> {
        IncentiveType::ALL.into_iter().filter(move |incentive| self.supports(*incentive))
    }
}

const fn flag(incentive: IncentiveType) -> u8 {
    match incentive {
        IncentiveType::FixedCashAmount => 1 << 0,
        IncentiveType::FixedRateRebate => 1 << 1,
        IncentiveType::AmountPerUom => 1 << 2,
    }
}

impl BitOr for SupportedIncentives {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl FromIterator<IncentiveType> for SupportedIncentives {
    fn from_iter<I: IntoIterator<Item = IncentiveType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, |set, incentive| set | Self::only(incentive))
    }
}

impl From<Vec<IncentiveType>> for SupportedIncentives {
    fn from(value: Vec<IncentiveType>) -> Self {
        value.into_iter().collect()
    }
}

impl From<SupportedIncentives> for Vec<IncentiveType> {
    fn from(value: SupportedIncentives) -> Self {
        value.iter().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub price: Decimal,
    pub uom: String,
    #[serde(default)]
    pub supported_incentives: SupportedIncentives,
}

impl Product {
    pub fn supports(&self, incentive: IncentiveType) -> bool {
        self.supported_incentives.supports(incentive)
    }
}
