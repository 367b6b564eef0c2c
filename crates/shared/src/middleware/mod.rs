mod identity;
mod validate;

pub use self::identity::{optional_identity, require_admin, require_identity, require_role};
pub use self::validate::SimpleValidatedJson;
