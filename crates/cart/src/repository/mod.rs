mod cart;

pub use self::cart::{CartCommandRepository, CartQueryRepository};
