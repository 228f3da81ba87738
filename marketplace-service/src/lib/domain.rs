pub mod access;
pub mod account;
pub mod audit;
pub mod errors;
pub mod pagination;
pub mod product;
