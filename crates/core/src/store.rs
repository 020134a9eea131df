use std::sync::Arc;

use crate::domain::calculation::RebateCalculation;
use crate::domain::product::{Product, ProductId};
use crate::domain::rebate::{Rebate, RebateId};

/// Rebate lookups plus the calculation side effect.
pub trait RebateStore: Send + Sync {
    fn find_by_id(&self, id: &RebateId) -> Option<Rebate>;

    /// Records a calculation, replacing any earlier one for the same rebate.
    fn store_calculation(&self, calculation: RebateCalculation);
}

pub trait ProductStore: Send + Sync {
    fn find_by_id(&self, id: &ProductId) -> Option<Product>;
}

impl<T: RebateStore + ?Sized> RebateStore for &T {
    fn find_by_id(&self, id: &RebateId) -> Option<Rebate> {
        (**self).find_by_id(id)
    }

    fn store_calculation(&self, calculation: RebateCalculation) {
        (**self).store_calculation(calculation)
    }
}

impl<T: RebateStore + ?Sized> RebateStore for Arc<T> {
    fn find_by_id(&self, id: &RebateId) -> Option<Rebate> {
        (**self).find_by_id(id)
    }

    fn store_calculation(&self, calculation: RebateCalculation) {
        (**self).store_calculation(calculation)
    }
}

impl<T: ProductStore + ?Sized> ProductStore for &T {
    fn find_by_id(&self, id: &ProductId) -> Option<Product> {
        (**self).find_by_id(id)
    }
}

impl<T: ProductStore + ?Sized> ProductStore for Arc<T> {
    fn find_by_id(&self, id: &ProductId) -> Option<Product> {
        (**self).find_by_id(id)
    }
}
