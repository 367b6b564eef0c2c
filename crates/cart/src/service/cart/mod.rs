mod command;
mod query;
mod resolver;

pub use self::command::{CartCommandService, CartCommandServiceDeps};
pub use self::query::CartQueryService;
pub use self::resolver::CartResolver;
