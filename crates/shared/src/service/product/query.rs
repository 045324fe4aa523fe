use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::responses::ProductResponse,
    errors::ServiceError,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    telemetry: ServiceTelemetry,
}

impl ProductQueryService {
    pub async fn new(query: DynProductQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let telemetry = ServiceTelemetry::new("product-query-service", &registry).await;

        Self { query, telemetry }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("📦 Listing products");

        let method = Method::Get;
        let tracing_ctx = self.telemetry.start_tracing(
            "FindAllProducts",
            vec![KeyValue::new("component", "product")],
        );

        match self.query.find_all().await {
            Ok(products) => {
                self.telemetry.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Products retrieved successfully",
                );
                Ok(products.into_iter().map(ProductResponse::from).collect())
            }
            Err(err) => {
                error!("❌ Failed to list products: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }
}
