mod order;
mod order_item;
mod product;
mod user;

pub use self::order::{DEFAULT_ORDER_ADDRESS, ORDER_STATUS_PENDING, Order};
pub use self::order_item::OrderItem;
pub use self::product::{MAX_AMOUNT, Product};
pub use self::user::User;
