use crate::{
    abstract_trait::{
        DynHashing, DynUserCommandRepository, DynUserQueryRepository, RegisterServiceTrait,
    },
    domain::{
        requests::{CreateUserRequest, RegisterRequest},
        responses::UserResponse,
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct RegisterService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hash: DynHashing,
    telemetry: ServiceTelemetry,
}

pub struct RegisterServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
    pub registry: Arc<Mutex<Registry>>,
}

impl RegisterService {
    pub async fn new(deps: RegisterServiceDeps) -> Self {
        let RegisterServiceDeps {
            query,
            command,
            hash,
            registry,
        } = deps;

        let telemetry = ServiceTelemetry::new("register-service", &registry).await;

        Self {
            query,
            command,
            hash,
            telemetry,
        }
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(&self, req: &RegisterRequest) -> Result<UserResponse, ServiceError> {
        info!("📝 Registering user: {}", req.email);

        let method = Method::Post;
        let tracing_ctx = self.telemetry.start_tracing(
            "Register",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        match self.query.find_by_email(&req.email).await {
            Ok(None) => {}
            Ok(Some(_)) => {
                warn!("❌ Email already registered: {}", req.email);
                self.telemetry
                    .complete_tracing_rejected(&tracing_ctx, method, "Email already exists");
                return Err(ServiceError::AlreadyExists(format!(
                    "user with email {} already exists",
                    req.email
                )));
            }
            Err(err) => {
                error!("❌ Failed to check existing email: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        }

        let hashed_password = match self.hash.hash_password(&req.password).await {
            Ok(hashed) => hashed,
            Err(err) => {
                error!("❌ Failed to hash password: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Hashing failed");
                return Err(err);
            }
        };

        let new_user = CreateUserRequest {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            password: hashed_password,
        };

        let user = match self.command.create_user(&new_user).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists(msg)) => {
                warn!("❌ {msg}");
                self.telemetry
                    .complete_tracing_rejected(&tracing_ctx, method, "Email already exists");
                return Err(ServiceError::AlreadyExists(msg));
            }
            Err(err) => {
                error!("❌ Failed to create user: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        };

        self.telemetry
            .complete_tracing_success(&tracing_ctx, method, "User registered");

        Ok(UserResponse::from(user))
    }
}
