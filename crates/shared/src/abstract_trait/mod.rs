mod identity;
mod jwt;

pub use self::identity::{DynIdentityResolver, IdentityResolverTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
