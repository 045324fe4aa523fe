use crate::{
    abstract_trait::{DynUserQueryRepository, UserQueryServiceTrait},
    domain::responses::UserResponse,
    errors::ServiceError,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct UserQueryService {
    query: DynUserQueryRepository,
    telemetry: ServiceTelemetry,
}

impl UserQueryService {
    pub async fn new(query: DynUserQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let telemetry = ServiceTelemetry::new("user-query-service", &registry).await;

        Self { query, telemetry }
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_by_id(&self, id: i32) -> Result<UserResponse, ServiceError> {
        info!("👤 Fetching user by ID: {id}");

        let method = Method::Get;
        let tracing_ctx = self.telemetry.start_tracing(
            "FindUserById",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(user)) => {
                self.telemetry
                    .complete_tracing_success(&tracing_ctx, method, "User found");
                Ok(UserResponse::from(user))
            }
            Ok(None) => {
                self.telemetry
                    .complete_tracing_rejected(&tracing_ctx, method, "User not found");
                Err(ServiceError::NotFound(format!("user with id {id} not found")))
            }
            Err(err) => {
                error!("❌ Failed to fetch user {id}: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::requests::CreateUserRequest,
        repository::{InMemoryStore, Repositories},
    };

    #[tokio::test]
    async fn finds_existing_user_and_reports_missing_one() {
        let repos = Repositories::in_memory(&InMemoryStore::new());
        let user = repos
            .user
            .command
            .create_user(&CreateUserRequest {
                first_name: "Alan".into(),
                last_name: "Turing".into(),
                email: "alan@example.com".into(),
                password: "hash".into(),
            })
            .await
            .unwrap();

        let service =
            UserQueryService::new(repos.user.query, Arc::new(Mutex::new(Registry::default())))
                .await;

        let found = service.find_by_id(user.id).await.unwrap();
        assert_eq!(found.email, "alan@example.com");

        let missing = service.find_by_id(user.id + 1).await.unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));
    }
}
