mod cart;

pub use self::cart::{BookIdRequest, ClearCartRequest};
