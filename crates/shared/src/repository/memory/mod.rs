mod order;
mod product;
mod store;
mod user;

pub use self::order::{MemoryCheckoutTransaction, MemoryCheckoutUnitOfWork};
pub use self::product::MemoryProductRepository;
pub use self::store::InMemoryStore;
pub use self::user::MemoryUserRepository;
