use super::InMemoryStore;
use crate::{
    abstract_trait::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    domain::requests::CreateProductRequest,
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use chrono::Utc;

#[derive(Clone)]
pub struct MemoryProductRepository {
    store: InMemoryStore,
}

impl MemoryProductRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.store.lock().await.products.values().cloned().collect())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        let tables = self.store.lock().await;

        Ok(tables
            .products
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryProductRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut tables = self.store.lock().await;
        let id = tables.next_product_id();

        let product = ProductModel {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
            image: req.image.clone(),
            price: req.price,
            quantity: req.quantity,
            created_at: Some(Utc::now().naive_utc()),
        };
        tables.products.insert(id, product.clone());

        Ok(product)
    }

    async fn update_product(
        &self,
        product: &ProductModel,
    ) -> Result<ProductModel, RepositoryError> {
        let mut tables = self.store.lock().await;
        let stored = tables
            .products
            .get_mut(&product.id)
            .ok_or(RepositoryError::NotFound)?;

        stored.name = product.name.clone();
        stored.description = product.description.clone();
        stored.image = product.image.clone();
        stored.price = product.price;
        stored.quantity = product.quantity;

        Ok(stored.clone())
    }
}
