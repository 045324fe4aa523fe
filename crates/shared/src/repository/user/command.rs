use crate::{
    abstract_trait::UserCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateUserRequest, errors::RepositoryError, model::User as UserModel,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (first_name, last_name, email, password, created_at)
            VALUES ($1, $2, $3, $4, current_timestamp)
            RETURNING id, first_name, last_name, email, password, created_at
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.password)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            // a concurrent registration can slip past the service's email check
            let is_duplicate = err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());

            if is_duplicate {
                RepositoryError::AlreadyExists(format!(
                    "user with email {} already exists",
                    req.email
                ))
            } else {
                error!("❌ Failed to create user {}: {:?}", req.email, err);
                RepositoryError::from(err)
            }
        })?;

        info!("✅ Created user ID {} ({})", user.id, user.email);
        Ok(user)
    }
}
