mod repository;
mod service;

pub use self::repository::{
    DynOrderCommandRepository, DynOrderQueryRepository, MockOrderCommandRepositoryTrait,
    MockOrderQueryRepositoryTrait, OrderCommandRepositoryTrait, OrderQueryRepositoryTrait,
};
pub use self::service::{
    DynOrderCommandService, DynOrderQueryService, MockOrderCommandServiceTrait,
    MockOrderQueryServiceTrait, OrderCommandServiceTrait, OrderQueryServiceTrait,
};
