use thiserror::Error;

use crate::domain::{product::ProductId, rebate::IncentiveType, rebate::RebateId};

/// Caller contract violations.
///
/// These are programming errors at an API boundary and are never turned into a
/// business failure message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),
    #[error("argument `{0}` must not be blank")]
    BlankIdentifier(&'static str),
}

/// Business rule violations raised by calculator strategies.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Product does not support Fixed Cash Amount incentive")]
    FixedCashAmountUnsupported,
    #[error("Product does not support Fixed Rate Rebate incentive")]
    FixedRateRebateUnsupported,
    #[error("Product does not support Amount Per UOM incentive")]
    AmountPerUomUnsupported,
    #[error("Volume is required for Fixed Rate Rebate calculation")]
    FixedRateVolumeRequired,
    #[error("Volume is required for Amount Per UOM calculation")]
    AmountPerUomVolumeRequired,
    #[error("Volume must be greater than zero")]
    NonPositiveVolume,
    #[error("Rebate amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Rebate percentage must be greater than zero")]
    NonPositivePercentage,
    #[error("Product price must be greater than zero")]
    NonPositivePrice,
    #[error("Rebate amount is out of range")]
    AmountOutOfRange,
}

/// Reasons the orchestration service reports a failed calculation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RebateFailure {
    #[error("Rebate not found with identifier: {0}")]
    RebateNotFound(RebateId),
    #[error("Product not found with identifier: {0}")]
    ProductNotFound(ProductId),
    #[error("No calculator found for incentive type: {0}")]
    NoCalculator(IncentiveType),
    #[error("{0}")]
    Calculation(String),
}

impl RebateFailure {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::RebateNotFound(_) => "rebate_not_found",
            Self::ProductNotFound(_) => "product_not_found",
            Self::NoCalculator(_) => "no_calculator",
            Self::Calculation(_) => "calculation_rejected",
        }
    }
}
