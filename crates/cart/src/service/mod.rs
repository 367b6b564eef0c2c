mod cart;

pub use self::cart::{
    CartCommandService, CartCommandServiceDeps, CartQueryService, CartResolver,
};
