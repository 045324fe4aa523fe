use crate::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{Config, Hashing, JwtConfig},
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::Repositories,
    utils::SystemMetrics,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &"<dyn JwtService>")
            .finish()
    }
}

impl AppState {
    pub async fn new(repositories: Repositories, config: &Config) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(
            &config.jwt_secret,
            config.jwt_expiration_secs,
        )) as DynJwtService;
        let hashing = Arc::new(Hashing::new(config.bcrypt_cost)) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        let deps = DependenciesInjectDeps {
            repositories,
            hash: hashing,
            jwt_config: jwt_config.clone(),
            registry: registry.clone(),
        };

        let di_container = DependenciesInject::new(deps).await;

        registry.lock().await.register_metrics(&system_metrics);

        Self {
            di_container,
            jwt_config,
            registry,
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
