mod auth;
mod cart;
mod hashing;
mod jwt;
mod order;
mod product;
mod user;

pub use self::auth::service::{
    DynLoginService, DynRegisterService, LoginServiceTrait, RegisterServiceTrait,
};
pub use self::cart::service::{CheckoutServiceTrait, DynCheckoutService};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::order::repository::{
    BoxedCheckoutTransaction, CheckoutTransactionTrait, CheckoutUnitOfWorkTrait,
    DynCheckoutUnitOfWork,
};
pub use self::product::{
    repository::{
        DynProductCommandRepository, DynProductQueryRepository, ProductCommandRepositoryTrait,
        ProductQueryRepositoryTrait,
    },
    service::{
        DynProductCommandService, DynProductQueryService, ProductCommandServiceTrait,
        ProductQueryServiceTrait,
    },
};
pub use self::user::{
    repository::{
        DynUserCommandRepository, DynUserQueryRepository, UserCommandRepositoryTrait,
        UserQueryRepositoryTrait,
    },
    service::{DynUserQueryService, UserQueryServiceTrait},
};
