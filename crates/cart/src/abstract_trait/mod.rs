pub mod cart;
pub mod catalog;
