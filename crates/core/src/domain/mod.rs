pub mod calculation;
pub mod product;
pub mod rebate;
