mod locks;
mod workflow;

pub use self::locks::CheckoutLocks;
pub use self::workflow::{CheckoutService, CheckoutServiceDeps};
