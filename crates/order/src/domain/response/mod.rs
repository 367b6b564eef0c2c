mod cart;
mod order;

pub use self::cart::{CartBookResponse, CartLineResponse, CartResponse};
pub use self::order::{OrderCreatedResponse, OrderItemResponse, OrderResponse};
