use crate::{
    abstract_trait::{BoxedCheckoutTransaction, CheckoutTransactionTrait, CheckoutUnitOfWorkTrait},
    config::ConnectionPool,
    domain::requests::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{error, info};

#[derive(Clone)]
pub struct PgCheckoutUnitOfWork {
    db: ConnectionPool,
}

impl PgCheckoutUnitOfWork {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CheckoutUnitOfWorkTrait for PgCheckoutUnitOfWork {
    async fn begin(&self) -> Result<BoxedCheckoutTransaction, RepositoryError> {
        let tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin checkout transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(Box::new(PgCheckoutTransaction { tx: Some(tx) }))
    }
}

/// Rolls back on drop unless `commit` ran.
pub struct PgCheckoutTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgCheckoutTransaction {
    fn conn(&mut self) -> Result<&mut PgConnection, RepositoryError> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| RepositoryError::Custom("checkout transaction already closed".into()))
    }
}

#[async_trait]
impl CheckoutTransactionTrait for PgCheckoutTransaction {
    async fn decreasing_stock(
        &mut self,
        product_id: i32,
        qty: i32,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let conn = self.conn()?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET quantity = quantity - $1
            WHERE id = $2 AND quantity >= $1
            RETURNING id, name, description, image, price, quantity, created_at
            "#,
        )
        .bind(qty)
        .bind(product_id)
        .fetch_optional(conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to decrease stock product {}: {:?}",
                product_id, err
            );
            RepositoryError::from(err)
        })?;

        if let Some(product) = &result {
            info!(
                "✅ Decreased stock product ID {} (new stock: {})",
                product.id, product.quantity
            );
        }

        Ok(result)
    }

    async fn create_order(
        &mut self,
        req: &CreateOrderRecordRequest,
    ) -> Result<i32, RepositoryError> {
        let conn = self.conn()?;

        let order_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (user_id, total, status, address, created_at)
            VALUES ($1, $2, $3, $4, current_timestamp)
            RETURNING id
            "#,
        )
        .bind(req.user_id)
        .bind(req.total)
        .bind(&req.status)
        .bind(&req.address)
        .fetch_one(conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for user {}: {:?}",
                req.user_id, err
            );
            RepositoryError::from(err)
        })?;

        info!("✅ Created order ID {} for user {}", order_id, req.user_id);
        Ok(order_id)
    }

    async fn create_order_item(
        &mut self,
        req: &CreateOrderItemRecordRequest,
    ) -> Result<(), RepositoryError> {
        let conn = self.conn()?;

        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price, created_at)
            VALUES ($1, $2, $3, $4, current_timestamp)
            "#,
        )
        .bind(req.order_id)
        .bind(req.product_id)
        .bind(req.quantity)
        .bind(req.price)
        .execute(conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order item for order {} product {}: {:?}",
                req.order_id, req.product_id, err
            );
            RepositoryError::from(err)
        })?;

        Ok(())
    }

    async fn commit(&mut self) -> Result<(), RepositoryError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| RepositoryError::Custom("checkout transaction already closed".into()))?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit checkout transaction: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
