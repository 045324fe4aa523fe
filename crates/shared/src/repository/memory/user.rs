use super::InMemoryStore;
use crate::{
    abstract_trait::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    domain::requests::CreateUserRequest,
    errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use chrono::Utc;

#[derive(Clone)]
pub struct MemoryUserRepository {
    store: InMemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        Ok(self.store.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        let tables = self.store.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryUserRepository {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        let mut tables = self.store.lock().await;

        if tables.users.values().any(|u| u.email == req.email) {
            return Err(RepositoryError::AlreadyExists(format!(
                "user with email {} already exists",
                req.email
            )));
        }

        let id = tables.next_user_id();
        let user = UserModel {
            id,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        tables.users.insert(id, user.clone());

        Ok(user)
    }
}
