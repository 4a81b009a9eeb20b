pub mod product;
pub mod weather;
