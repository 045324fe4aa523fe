mod command;
mod query;

pub use self::command::ProductCommandService;
pub use self::query::ProductQueryService;

use crate::abstract_trait::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct ProductService {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl ProductService {
    pub async fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let query = Arc::new(ProductQueryService::new(query, registry.clone()).await)
            as DynProductQueryService;
        let command = Arc::new(ProductCommandService::new(command, registry).await)
            as DynProductCommandService;

        Self { query, command }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::requests::{CreateProductRequest, UpdateProductRequest},
        errors::ServiceError,
        repository::{InMemoryStore, Repositories},
    };
    use rust_decimal::Decimal;

    async fn service() -> ProductService {
        let repos = Repositories::in_memory(&InMemoryStore::new());
        ProductService::new(
            repos.product.query,
            repos.product.command,
            Arc::new(Mutex::new(Registry::default())),
        )
        .await
    }

    fn update(id: Option<i32>, quantity: i32) -> UpdateProductRequest {
        UpdateProductRequest {
            id,
            name: "Teapot".into(),
            description: "short and stout".into(),
            image: String::new(),
            price: Decimal::new(1999, 2),
            quantity,
        }
    }

    #[tokio::test]
    async fn created_products_are_listed() {
        let service = service().await;

        let created = service
            .command
            .create_product(&CreateProductRequest {
                name: "Kettle".into(),
                description: String::new(),
                image: String::new(),
                price: Decimal::new(2500, 2),
                quantity: 4,
            })
            .await
            .unwrap();

        let listed = service.query.find_all().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn update_overwrites_and_missing_product_is_not_found() {
        let service = service().await;
        let created = service
            .command
            .create_product(&CreateProductRequest {
                name: "Kettle".into(),
                description: String::new(),
                image: String::new(),
                price: Decimal::new(2500, 2),
                quantity: 4,
            })
            .await
            .unwrap();

        let updated = service
            .command
            .update_product(&update(Some(created.id), 9))
            .await
            .unwrap();
        assert_eq!(updated.name, "Teapot");
        assert_eq!(updated.quantity, 9);
        assert_eq!(updated.created_at, created.created_at);

        let missing = service
            .command
            .update_product(&update(Some(created.id + 100), 1))
            .await
            .unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));
    }
}
