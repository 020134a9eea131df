use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::{Product, ProductId};
use crate::domain::rebate::{IncentiveType, Rebate, RebateId};
use crate::errors::{ContractError, RebateFailure, RuleViolation};

/// Caller input for a single rebate calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub rebate_id: RebateId,
    pub product_id: ProductId,
    pub volume: Option<Decimal>,
}

impl CalculationRequest {
    pub fn new(
        rebate_id: impl Into<String>,
        product_id: impl Into<String>,
        volume: Option<Decimal>,
    ) -> Result<Self, ContractError> {
        let rebate_id = non_blank("rebate_id", rebate_id.into())?;
        let product_id = non_blank("product_id", product_id.into())?;

        Ok(Self { rebate_id: RebateId(rebate_id), product_id: ProductId(product_id), volume })
    }
}

/// Identifiers are kept verbatim; normalising user input is the caller's job.
fn non_blank(argument: &'static str, value: String) -> Result<String, ContractError> {
    if value.trim().is_empty() {
        return Err(ContractError::BlankIdentifier(argument));
    }
    Ok(value)
}

/// Resolved inputs handed to a calculator strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationParameters {
    pub rebate: Rebate,
    pub product: Product,
    pub volume: Option<Decimal>,
}

impl CalculationParameters {
    pub fn new(rebate: Rebate, product: Product, volume: Option<Decimal>) -> Self {
        Self { rebate, product, volume }
    }

    pub fn builder() -> CalculationParametersBuilder {
        CalculationParametersBuilder::default()
    }
}

/// Piecemeal assembly of [`CalculationParameters`] for callers that resolve
/// the rebate and product separately.
#[derive(Clone, Debug, Default)]
pub struct CalculationParametersBuilder {
    rebate: Option<Rebate>,
    product: Option<Product>,
    volume: Option<Decimal>,
}

impl CalculationParametersBuilder {
    pub fn rebate(mut self, rebate: Rebate) -> Self {
        self.rebate = Some(rebate);
        self
    }

    pub fn product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    pub fn volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn build(self) -> Result<CalculationParameters, ContractError> {
        let rebate = self.rebate.ok_or(ContractError::MissingArgument("rebate"))?;
        let product = self.product.ok_or(ContractError::MissingArgument("product"))?;
        Ok(CalculationParameters::new(rebate, product, self.volume))
    }
}

/// Result of a single strategy evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Success { amount: Decimal },
    Failure { reason: String },
}

impl CalculationOutcome {
    pub fn success(amount: Decimal) -> Self {
        Self::Success { amount }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure { reason: reason.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Success { amount } => Some(*amount),
            Self::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

impl From<RuleViolation> for CalculationOutcome {
    fn from(value: RuleViolation) -> Self {
        Self::failure(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationId(pub String);

impl CalculationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Persisted record of a successful calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateCalculation {
    pub id: CalculationId,
    pub rebate_id: RebateId,
    pub incentive: IncentiveType,
    pub amount: Decimal,
    pub calculated_at: DateTime<Utc>,
}

impl RebateCalculation {
    pub fn record(rebate: &Rebate, amount: Decimal) -> Self {
        Self {
            id: CalculationId::generate(),
            rebate_id: rebate.id.clone(),
            incentive: rebate.incentive,
            amount,
            calculated_at: Utc::now(),
        }
    }
}

/// What the orchestration service reports back. The computed amount is only
/// persisted, never returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResult {
    pub success: bool,
    pub error_message: Option<String>,
}

impl ServiceResult {
    pub fn succeeded() -> Self {
        Self { success: true, error_message: None }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Self { success: false, error_message: Some(error_message.into()) }
    }
}

impl From<RebateFailure> for ServiceResult {
    fn from(value: RebateFailure) -> Self {
        Self::failure(value.to_string())
    }
}
