pub mod calculators;
pub mod config;
pub mod domain;
pub mod errors;
pub mod service;
pub mod store;

pub use calculators::{
    AmountPerUomCalculator, CalculatorRegistry, FixedCashAmountCalculator,
    FixedRateRebateCalculator, RebateCalculator,
};
pub use domain::calculation::{
    CalculationId, CalculationOutcome, CalculationParameters, CalculationParametersBuilder,
    CalculationRequest, RebateCalculation, ServiceResult,
};
pub use domain::product::{Product, ProductId, SupportedIncentives};
pub use domain::rebate::{IncentiveType, Rebate, RebateId};
pub use errors::{ContractError, RebateFailure, RuleViolation};
pub use service::RebateService;
pub use store::{ProductStore, RebateStore};
