mod repository;
mod service;

pub use self::repository::{
    CartCommandRepositoryTrait, CartQueryRepositoryTrait, DecrementOutcome,
    DynCartCommandRepository, DynCartQueryRepository, MockCartCommandRepositoryTrait,
    MockCartQueryRepositoryTrait,
};
pub use self::service::{
    CartCommandServiceTrait, CartQueryServiceTrait, DynCartCommandService, DynCartQueryService,
    MockCartCommandServiceTrait, MockCartQueryServiceTrait,
};
