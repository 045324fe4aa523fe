mod memory;
mod order;
mod product;
mod user;

pub use self::memory::{
    InMemoryStore, MemoryCheckoutTransaction, MemoryCheckoutUnitOfWork, MemoryProductRepository,
    MemoryUserRepository,
};
pub use self::order::{PgCheckoutTransaction, PgCheckoutUnitOfWork};
pub use self::product::ProductRepository;
pub use self::user::UserRepository;

use crate::{
    abstract_trait::{
        DynCheckoutUnitOfWork, DynProductCommandRepository, DynProductQueryRepository,
        DynUserCommandRepository, DynUserQueryRepository,
    },
    config::ConnectionPool,
};
use std::sync::Arc;

/// Every storage capability the services need, backed by a single store.
#[derive(Clone)]
pub struct Repositories {
    pub user: UserRepository,
    pub product: ProductRepository,
    pub checkout: DynCheckoutUnitOfWork,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            product: ProductRepository::new(pool.clone()),
            checkout: Arc::new(PgCheckoutUnitOfWork::new(pool)) as DynCheckoutUnitOfWork,
        }
    }

    pub fn in_memory(store: &InMemoryStore) -> Self {
        let users = Arc::new(MemoryUserRepository::new(store.clone()));
        let products = Arc::new(MemoryProductRepository::new(store.clone()));

        Self {
            user: UserRepository {
                query: users.clone() as DynUserQueryRepository,
                command: users as DynUserCommandRepository,
            },
            product: ProductRepository {
                query: products.clone() as DynProductQueryRepository,
                command: products as DynProductCommandRepository,
            },
            checkout: Arc::new(MemoryCheckoutUnitOfWork::new(store.clone()))
                as DynCheckoutUnitOfWork,
        }
    }
}
