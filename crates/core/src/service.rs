use tracing::{debug, info, warn};

use crate::calculators::CalculatorRegistry;
use crate::domain::calculation::{
    CalculationOutcome, CalculationParameters, CalculationRequest, RebateCalculation,
    ServiceResult,
};
use crate::errors::RebateFailure;
use crate::store::{ProductStore, RebateStore};

const GENERIC_CALCULATION_FAILURE: &str = "Calculation failed";

/// Resolves a rebate and product, runs the matching calculator and records
/// the result.
#[derive(Debug)]
pub struct RebateService<R, P> {
    rebate_store: R,
    product_store: P,
    calculators: CalculatorRegistry,
}

impl<R, P> RebateService<R, P>
where
    R: RebateStore,
    P: ProductStore,
{
    pub fn new(rebate_store: R, product_store: P, calculators: CalculatorRegistry) -> Self {
        Self { rebate_store, product_store, calculators }
    }

    pub fn with_default_calculators(rebate_store: R, product_store: P) -> Self {
        Self::new(rebate_store, product_store, CalculatorRegistry::default())
    }

    pub fn calculate(&self, request: &CalculationRequest) -> ServiceResult {
        match self.try_calculate(request) {
            Ok(calculation) => {
                info!(
                    event_name = "rebate.calculation.stored",
                    rebate_id = %calculation.rebate_id,
                    product_id = %request.product_id,
                    incentive = %calculation.incentive,
                    amount = %calculation.amount,
                    "rebate calculation stored"
                );
                ServiceResult::succeeded()
            }
            Err(failure) => {
                warn!(
                    event_name = "rebate.calculation.rejected",
                    rebate_id = %request.rebate_id,
                    product_id = %request.product_id,
                    error_class = failure.error_class(),
                    reason = %failure,
                    "rebate calculation rejected"
                );
                failure.into()
            }
        }
    }

    /// Runs the workflow and returns the stored record on success.
    pub fn try_calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<RebateCalculation, RebateFailure> {
        let rebate = self
            .rebate_store
            .find_by_id(&request.rebate_id)
            .ok_or_else(|| RebateFailure::RebateNotFound(request.rebate_id.clone()))?;

        let product = self
            .product_store
            .find_by_id(&request.product_id)
            .ok_or_else(|| RebateFailure::ProductNotFound(request.product_id.clone()))?;

        let calculator = self
            .calculators
            .select(rebate.incentive)
            .ok_or(RebateFailure::NoCalculator(rebate.incentive))?;
        debug!(
            event_name = "rebate.calculation.selected",
            rebate_id = %rebate.id,
            incentive = %rebate.incentive,
            "calculator selected"
        );

        let parameters = CalculationParameters::new(rebate, product, request.volume);
        let amount = match calculator.calculate(&parameters) {
            CalculationOutcome::Success { amount } => amount,
            CalculationOutcome::Failure { reason } if reason.trim().is_empty() => {
                return Err(RebateFailure::Calculation(GENERIC_CALCULATION_FAILURE.to_owned()));
            }
            CalculationOutcome::Failure { reason } => {
                return Err(RebateFailure::Calculation(reason));
            }
        };

        let calculation = RebateCalculation::record(&parameters.rebate, amount);
        self.rebate_store.store_calculation(calculation.clone());
        Ok(calculation)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::RebateService;
    use crate::calculators::{CalculatorRegistry, RebateCalculator};
    use crate::domain::calculation::{
        CalculationOutcome, CalculationParameters, CalculationRequest, RebateCalculation,
        ServiceResult,
    };
    use crate::domain::product::{Product, ProductId, SupportedIncentives};
    use crate::domain::rebate::{IncentiveType, Rebate, RebateId};
    use crate::store::{ProductStore, RebateStore};

    #[derive(Default)]
    struct RecordingRebateStore {
        rebates: HashMap<String, Rebate>,
        stored: Mutex<Vec<RebateCalculation>>,
    }

    impl RecordingRebateStore {
        fn with(rebate: Rebate) -> Self {
            let mut store = Self::default();
            store.rebates.insert(rebate.id.0.clone(), rebate);
            store
        }

        fn stored(&self) -> Vec<RebateCalculation> {
            self.stored.lock().map(|stored| stored.clone()).unwrap_or_default()
        }
    }

    impl RebateStore for RecordingRebateStore {
        fn find_by_id(&self, id: &RebateId) -> Option<Rebate> {
            self.rebates.get(&id.0).cloned()
        }

        fn store_calculation(&self, calculation: RebateCalculation) {
            if let Ok(mut stored) = self.stored.lock() {
                stored.push(calculation);
            }
        }
    }

    #[derive(Default)]
    struct StaticProductStore {
        products: HashMap<String, Product>,
    }

    impl StaticProductStore {
        fn with(product: Product) -> Self {
            let mut store = Self::default();
            store.products.insert(product.id.0.clone(), product);
            store
        }
    }

    impl ProductStore for StaticProductStore {
        fn find_by_id(&self, id: &ProductId) -> Option<Product> {
            self.products.get(&id.0).cloned()
        }
    }

    struct StubCalculator {
        handles: bool,
        outcome: CalculationOutcome,
    }

    impl RebateCalculator for StubCalculator {
        fn can_calculate(&self, _incentive: IncentiveType) -> bool {
            self.handles
        }

        fn calculate(&self, _parameters: &CalculationParameters) -> CalculationOutcome {
            self.outcome.clone()
        }
    }

    fn rebate(incentive: IncentiveType) -> Rebate {
        Rebate {
            id: RebateId("R1".to_owned()),
            incentive,
            amount: Decimal::new(50, 0),
            percentage: Decimal::new(1, 1),
        }
    }

    fn product() -> Product {
        Product {
            id: ProductId("P1".to_owned()),
            price: Decimal::new(100, 0),
            uom: "KG".to_owned(),
            supported_incentives: SupportedIncentives::FIXED_CASH_AMOUNT
                | SupportedIncentives::FIXED_RATE_REBATE,
        }
    }

    fn request(volume: Option<Decimal>) -> CalculationRequest {
        CalculationRequest::new("R1", "P1", volume).expect("valid request")
    }

    fn stub(handles: bool, outcome: CalculationOutcome) -> CalculatorRegistry {
        CalculatorRegistry::empty().register(StubCalculator { handles, outcome })
    }

    #[test]
    fn unknown_rebate_fails_without_storing() {
        let rebates = RecordingRebateStore::default();
        let service = RebateService::new(
            &rebates,
            StaticProductStore::with(product()),
            stub(true, CalculationOutcome::success(Decimal::ONE)),
        );

        let result = service.calculate(&request(None));

        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("Rebate not found with identifier: R1"));
        assert!(rebates.stored().is_empty());
    }

    #[test]
    fn unknown_product_fails_without_storing() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::FixedCashAmount));
        let service = RebateService::new(
            &rebates,
            StaticProductStore::default(),
            stub(true, CalculationOutcome::success(Decimal::ONE)),
        );

        let result = service.calculate(&request(None));

        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("Product not found with identifier: P1"));
        assert!(rebates.stored().is_empty());
    }

    #[test]
    fn missing_calculator_names_the_incentive() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::FixedCashAmount));
        let service = RebateService::new(
            &rebates,
            StaticProductStore::with(product()),
            stub(false, CalculationOutcome::success(Decimal::ONE)),
        );

        let result = service.calculate(&request(None));

        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("No calculator found for incentive type: FixedCashAmount")
        );
        assert!(rebates.stored().is_empty());
    }

    #[test]
    fn strategy_failure_reason_is_propagated() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::FixedCashAmount));
        let service = RebateService::new(
            &rebates,
            StaticProductStore::with(product()),
            stub(true, CalculationOutcome::failure("Rebate amount must be greater than zero")),
        );

        let result = service.calculate(&request(None));

        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Rebate amount must be greater than zero")
        );
        assert!(rebates.stored().is_empty());
    }

    #[test]
    fn empty_strategy_reason_falls_back_to_generic_message() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::FixedCashAmount));
        let service = RebateService::new(
            &rebates,
            StaticProductStore::with(product()),
            stub(true, CalculationOutcome::failure("")),
        );

        let result = service.calculate(&request(None));

        assert_eq!(result, ServiceResult::failure("Calculation failed"));
    }

    #[test]
    fn success_stores_exactly_one_calculation_and_hides_amount() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::FixedCashAmount));
        let service = RebateService::new(
            &rebates,
            StaticProductStore::with(product()),
            stub(true, CalculationOutcome::success(Decimal::ONE_HUNDRED)),
        );

        let ServiceResult { success, error_message } = service.calculate(&request(None));

        assert!(success);
        assert_eq!(error_message, None);
        let stored = rebates.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].rebate_id, RebateId("R1".to_owned()));
        assert_eq!(stored[0].incentive, IncentiveType::FixedCashAmount);
        assert_eq!(stored[0].amount, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn default_calculators_price_fixed_rate_rebates() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::FixedRateRebate));
        let service =
            RebateService::with_default_calculators(&rebates, StaticProductStore::with(product()));

        let calculation =
            service.try_calculate(&request(Some(Decimal::new(3, 0)))).expect("fixed rate succeeds");

        // 100 * 0.1 * 3
        assert_eq!(calculation.amount, Decimal::new(30, 0));
        assert_eq!(rebates.stored(), vec![calculation]);
    }

    #[test]
    fn default_calculators_surface_rule_violations() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::AmountPerUom));
        let service =
            RebateService::with_default_calculators(&rebates, StaticProductStore::with(product()));

        let result = service.calculate(&request(Some(Decimal::TEN)));

        assert_eq!(
            result.error_message.as_deref(),
            Some("Product does not support Amount Per UOM incentive")
        );
        assert!(rebates.stored().is_empty());
    }

    #[test]
    fn failed_call_does_not_affect_the_next_one() {
        let rebates = RecordingRebateStore::with(rebate(IncentiveType::FixedRateRebate));
        let service =
            RebateService::with_default_calculators(&rebates, StaticProductStore::with(product()));

        assert!(!service.calculate(&request(None)).success);
        assert!(service.calculate(&request(Some(Decimal::ONE))).success);
        assert_eq!(rebates.stored().len(), 1);
    }
}
