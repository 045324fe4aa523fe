use crate::{
    abstract_trait::{DynProductCommandRepository, ProductCommandServiceTrait},
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::ProductResponse,
    },
    errors::{RepositoryError, ServiceError},
    model::Product as ProductModel,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    telemetry: ServiceTelemetry,
}

impl ProductCommandService {
    pub async fn new(
        command: DynProductCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let telemetry = ServiceTelemetry::new("product-command-service", &registry).await;

        Self { command, telemetry }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🆕 Creating product: {}", req.name);

        let method = Method::Post;
        let tracing_ctx = self.telemetry.start_tracing(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        match self.command.create_product(req).await {
            Ok(product) => {
                self.telemetry.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Product created successfully",
                );
                Ok(ProductResponse::from(product))
            }
            Err(err) => {
                error!("❌ Failed to create product {}: {err}", req.name);
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        let id = req
            .id
            .ok_or_else(|| ServiceError::Validation(vec!["product id is required".into()]))?;

        info!("🔄 Updating product ID: {id}");

        let method = Method::Put;
        let tracing_ctx = self.telemetry.start_tracing(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product = ProductModel {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
            image: req.image.clone(),
            price: req.price,
            quantity: req.quantity,
            created_at: None,
        };

        match self.command.update_product(&product).await {
            Ok(updated) => {
                self.telemetry.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Product updated successfully",
                );
                Ok(ProductResponse::from(updated))
            }
            Err(RepositoryError::NotFound) => {
                self.telemetry
                    .complete_tracing_rejected(&tracing_ctx, method, "Product not found");
                Err(ServiceError::NotFound(format!(
                    "product with id {id} not found"
                )))
            }
            Err(err) => {
                error!("❌ Failed to update product {id}: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }
}
