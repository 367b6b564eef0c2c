mod bearer;
mod chain;
mod forwarded;

pub use self::bearer::BearerTokenResolver;
pub use self::chain::IdentityChain;
pub use self::forwarded::{
    ForwardedHeadersResolver, USER_EMAIL_HEADER, USER_ID_HEADER, USER_ROLE_HEADER,
};
