use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use rebate_core::domain::calculation::RebateCalculation;
use rebate_core::domain::product::{Product, ProductId};
use rebate_core::domain::rebate::{Rebate, RebateId};
use rebate_core::store::{ProductStore, RebateStore};

/// Rebates and their latest calculation, keyed by rebate identifier.
#[derive(Debug, Default)]
pub struct InMemoryRebateStore {
    rebates: RwLock<HashMap<String, Rebate>>,
    calculations: RwLock<HashMap<String, RebateCalculation>>,
}

impl InMemoryRebateStore {
    pub fn insert(&self, rebate: Rebate) {
        let mut rebates = self.rebates.write().unwrap_or_else(PoisonError::into_inner);
        rebates.insert(rebate.id.0.clone(), rebate);
    }

    pub fn calculation_for(&self, id: &RebateId) -> Option<RebateCalculation> {
        let calculations = self.calculations.read().unwrap_or_else(PoisonError::into_inner);
        calculations.get(&id.0).cloned()
    }

    pub fn calculation_count(&self) -> usize {
        self.calculations.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn rebates(&self) -> Vec<Rebate> {
        let rebates = self.rebates.read().unwrap_or_else(PoisonError::into_inner);
        let mut listed: Vec<Rebate> = rebates.values().cloned().collect();
        listed.sort_by(|left, right| left.id.0.cmp(&right.id.0));
        listed
    }
}

impl RebateStore for InMemoryRebateStore {
    fn find_by_id(&self, id: &RebateId) -> Option<Rebate> {
        let rebates = self.rebates.read().unwrap_or_else(PoisonError::into_inner);
        rebates.get(&id.0).cloned()
    }

    fn store_calculation(&self, calculation: RebateCalculation) {
        let mut calculations = self.calculations.write().unwrap_or_else(PoisonError::into_inner);
        calculations.insert(calculation.rebate_id.0.clone(), calculation);
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductStore {
    pub fn insert(&self, product: Product) {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        products.insert(product.id.0.clone(), product);
    }

    pub fn products(&self) -> Vec<Product> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        let mut listed: Vec<Product> = products.values().cloned().collect();
        listed.sort_by(|left, right| left.id.0.cmp(&right.id.0));
        listed
    }
}

impl ProductStore for InMemoryProductStore {
    fn find_by_id(&self, id: &ProductId) -> Option<Product> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        products.get(&id.0).cloned()
    }
}
