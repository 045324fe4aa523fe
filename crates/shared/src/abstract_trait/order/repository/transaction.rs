use crate::{
    domain::requests::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCheckoutUnitOfWork = Arc<dyn CheckoutUnitOfWorkTrait + Send + Sync>;

pub type BoxedCheckoutTransaction = Box<dyn CheckoutTransactionTrait + Send>;

/// Opens the storage transaction that commits inventory and order rows
/// together.
#[async_trait]
pub trait CheckoutUnitOfWorkTrait {
    async fn begin(&self) -> Result<BoxedCheckoutTransaction, RepositoryError>;
}

/// Writes staged by a checkout. Nothing is visible to other readers until
/// `commit` succeeds; dropping the transaction without committing discards
/// every write.
#[async_trait]
pub trait CheckoutTransactionTrait {
    /// Decrements stock only if at least `qty` units remain. `None` means the
    /// product is gone or no longer has enough stock.
    async fn decreasing_stock(
        &mut self,
        product_id: i32,
        qty: i32,
    ) -> Result<Option<ProductModel>, RepositoryError>;

    async fn create_order(&mut self, req: &CreateOrderRecordRequest)
    -> Result<i32, RepositoryError>;

    async fn create_order_item(
        &mut self,
        req: &CreateOrderItemRecordRequest,
    ) -> Result<(), RepositoryError>;

    async fn commit(&mut self) -> Result<(), RepositoryError>;
}
