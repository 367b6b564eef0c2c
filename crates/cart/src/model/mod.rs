mod cart;

pub use self::cart::{Cart, CartItem};
