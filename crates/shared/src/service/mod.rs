mod auth;
mod cart;
mod product;
mod user;

pub use self::auth::{
    AuthService, AuthServiceDeps, LoginService, LoginServiceDeps, RegisterService,
    RegisterServiceDeps,
};
pub use self::cart::{CheckoutService, CheckoutServiceDeps};
pub use self::product::{ProductCommandService, ProductQueryService, ProductService};
pub use self::user::{UserQueryService, UserService};
