use super::{InMemoryStore, store::Tables};
use crate::{
    abstract_trait::{BoxedCheckoutTransaction, CheckoutTransactionTrait, CheckoutUnitOfWorkTrait},
    domain::requests::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

#[derive(Clone)]
pub struct MemoryCheckoutUnitOfWork {
    store: InMemoryStore,
}

impl MemoryCheckoutUnitOfWork {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CheckoutUnitOfWorkTrait for MemoryCheckoutUnitOfWork {
    async fn begin(&self) -> Result<BoxedCheckoutTransaction, RepositoryError> {
        let guard = self.store.lock_owned().await;
        let staged = guard.clone();

        Ok(Box::new(MemoryCheckoutTransaction {
            guard: Some(guard),
            staged,
            fail_order_items: self.store.order_items_fail(),
        }))
    }
}

pub struct MemoryCheckoutTransaction {
    guard: Option<OwnedMutexGuard<Tables>>,
    staged: Tables,
    fail_order_items: bool,
}

impl MemoryCheckoutTransaction {
    fn ensure_open(&self) -> Result<(), RepositoryError> {
        if self.guard.is_none() {
            return Err(RepositoryError::Custom(
                "checkout transaction already closed".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CheckoutTransactionTrait for MemoryCheckoutTransaction {
    async fn decreasing_stock(
        &mut self,
        product_id: i32,
        qty: i32,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        self.ensure_open()?;

        match self.staged.products.get_mut(&product_id) {
            Some(product) if product.quantity >= qty => {
                product.quantity -= qty;
                Ok(Some(product.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn create_order(
        &mut self,
        req: &CreateOrderRecordRequest,
    ) -> Result<i32, RepositoryError> {
        self.ensure_open()?;
        Ok(self.staged.insert_order(req))
    }

    async fn create_order_item(
        &mut self,
        req: &CreateOrderItemRecordRequest,
    ) -> Result<(), RepositoryError> {
        self.ensure_open()?;

        if self.fail_order_items {
            return Err(RepositoryError::Custom(format!(
                "order item write rejected for order {}",
                req.order_id
            )));
        }

        self.staged.insert_order_item(req);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), RepositoryError> {
        let mut guard = self.guard.take().ok_or_else(|| {
            RepositoryError::Custom("checkout transaction already closed".into())
        })?;

        *guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}
