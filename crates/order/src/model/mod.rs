mod order;

pub use self::order::{Order, OrderItem, OrderRecord, OrderStatus};
