use crate::{
    abstract_trait::{DynHashing, DynJwtService, DynUserQueryRepository, LoginServiceTrait},
    domain::{requests::LoginRequest, responses::TokenResponse},
    errors::ServiceError,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct LoginService {
    hash: DynHashing,
    jwt: DynJwtService,
    query: DynUserQueryRepository,
    telemetry: ServiceTelemetry,
}

pub struct LoginServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub query: DynUserQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl LoginService {
    pub async fn new(deps: LoginServiceDeps) -> Self {
        let LoginServiceDeps {
            hash,
            jwt,
            query,
            registry,
        } = deps;

        let telemetry = ServiceTelemetry::new("login-service", &registry).await;

        Self {
            hash,
            jwt,
            query,
            telemetry,
        }
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ServiceError> {
        let email = &request.email;
        info!("🔐 Attempting login for email: {email}");

        let method = Method::Post;
        let tracing_ctx = self.telemetry.start_tracing(
            "Login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", email.to_string()),
            ],
        );

        let user = match self.query.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("❌ Login rejected, unknown email: {email}");
                self.telemetry
                    .complete_tracing_rejected(&tracing_ctx, method, "User not found");
                return Err(ServiceError::InvalidCredentials);
            }
            Err(err) => {
                error!("❌ Failed to query user: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        };

        if let Err(err) = self
            .hash
            .compare_password(&user.password, &request.password)
            .await
        {
            warn!("❌ Login rejected for {email}: {err}");
            self.telemetry
                .complete_tracing_rejected(&tracing_ctx, method, "Invalid password");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = match self.jwt.generate_token(user.id) {
            Ok(token) => token,
            Err(err) => {
                error!("❌ Failed to sign token for user {}: {err}", user.id);
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Token generation failed");
                return Err(err);
            }
        };

        self.telemetry
            .complete_tracing_success(&tracing_ctx, method, "Login successful");

        Ok(TokenResponse { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{DynHashing, DynJwtService, JwtServiceTrait},
        config::{Hashing, JwtConfig},
        domain::requests::CreateUserRequest,
        repository::{InMemoryStore, Repositories},
    };

    async fn setup() -> (LoginService, DynJwtService) {
        let store = InMemoryStore::new();
        let repos = Repositories::in_memory(&store);
        let hash = Arc::new(Hashing::new(4)) as DynHashing;
        let jwt = Arc::new(JwtConfig::new("test-secret", 3600)) as DynJwtService;

        let password = hash.hash_password("secret").await.unwrap();
        repos
            .user
            .command
            .create_user(&CreateUserRequest {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                password,
            })
            .await
            .unwrap();

        let service = LoginService::new(LoginServiceDeps {
            hash,
            jwt: jwt.clone(),
            query: repos.user.query,
            registry: Arc::new(Mutex::new(Registry::default())),
        })
        .await;

        (service, jwt)
    }

    #[tokio::test]
    async fn login_returns_token_for_the_user() {
        let (service, jwt) = setup().await;

        let response = service
            .login(&LoginRequest {
                email: "ada@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(jwt.verify_token(&response.token).unwrap(), 1);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (service, _) = setup().await;

        let wrong_password = service
            .login(&LoginRequest {
                email: "ada@example.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        let unknown_email = service
            .login(&LoginRequest {
                email: "bob@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_email, ServiceError::InvalidCredentials));
    }
}
