mod auth;
mod cart;
mod order;
mod product;
mod user;

pub use self::auth::{LoginRequest, RegisterRequest};
pub use self::cart::{CartCheckoutRequest, CartItem};
pub use self::order::{CreateOrderItemRecordRequest, CreateOrderRecordRequest};
pub use self::product::{CreateProductRequest, UpdateProductRequest};
pub use self::user::CreateUserRequest;
