mod cart;
mod product;
mod token;
mod user;

pub use self::cart::CheckoutResponse;
pub use self::product::ProductResponse;
pub use self::token::TokenResponse;
pub use self::user::{MessageResponse, UserResponse};
