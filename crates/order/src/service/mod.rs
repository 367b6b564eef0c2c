mod checkout;
mod order;

pub use self::checkout::{CheckoutLocks, CheckoutService, CheckoutServiceDeps};
pub use self::order::{OrderCommandService, OrderQueryService};
