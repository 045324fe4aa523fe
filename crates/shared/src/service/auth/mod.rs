mod login;
mod register;

pub use self::login::{LoginService, LoginServiceDeps};
pub use self::register::{RegisterService, RegisterServiceDeps};

use crate::abstract_trait::{
    DynHashing, DynJwtService, DynLoginService, DynRegisterService, DynUserCommandRepository,
    DynUserQueryRepository,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AuthService {
    pub login: DynLoginService,
    pub register: DynRegisterService,
}

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let login = Arc::new(
            LoginService::new(LoginServiceDeps {
                hash: deps.hash.clone(),
                jwt: deps.jwt.clone(),
                query: deps.user_query.clone(),
                registry: deps.registry.clone(),
            })
            .await,
        ) as DynLoginService;

        let register = Arc::new(
            RegisterService::new(RegisterServiceDeps {
                query: deps.user_query,
                command: deps.user_command,
                hash: deps.hash,
                registry: deps.registry,
            })
            .await,
        ) as DynRegisterService;

        Self { login, register }
    }
}
