use crate::{
    abstract_trait::{DynCheckoutService, DynHashing, DynJwtService},
    repository::Repositories,
    service::{
        AuthService, AuthServiceDeps, CheckoutService, CheckoutServiceDeps, ProductService,
        UserService,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub product_service: ProductService,
    pub checkout_service: DynCheckoutService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("user_service", &"<UserService>")
            .field("product_service", &"<ProductService>")
            .field("checkout_service", &"<CheckoutService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            repositories,
            hash,
            jwt_config,
            registry,
        } = deps;

        let Repositories {
            user,
            product,
            checkout,
        } = repositories;

        let user_service = UserService::new(user.query.clone(), registry.clone()).await;

        let auth_service = AuthService::new(AuthServiceDeps {
            hash,
            jwt: jwt_config,
            user_query: user.query,
            user_command: user.command,
            registry: registry.clone(),
        })
        .await;

        let checkout_service = Arc::new(
            CheckoutService::new(CheckoutServiceDeps {
                product_query: product.query.clone(),
                unit_of_work: checkout,
                registry: registry.clone(),
            })
            .await,
        ) as DynCheckoutService;

        let product_service = ProductService::new(product.query, product.command, registry).await;

        Self {
            auth_service,
            user_service,
            product_service,
            checkout_service,
        }
    }
}
