mod book;
mod cart;

pub use self::book::BookResponse;
pub use self::cart::{CartLineResponse, CartResponse};
