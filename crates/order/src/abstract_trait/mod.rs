pub mod cart_client;
pub mod checkout;
pub mod order;
