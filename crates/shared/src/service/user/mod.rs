mod query;

pub use self::query::UserQueryService;

use crate::abstract_trait::{DynUserQueryRepository, DynUserQueryService};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct UserService {
    pub query: DynUserQueryService,
}

impl UserService {
    pub async fn new(query: DynUserQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let query = Arc::new(UserQueryService::new(query, registry).await) as DynUserQueryService;

        Self { query }
    }
}
