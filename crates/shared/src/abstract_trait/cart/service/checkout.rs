use crate::{
    domain::{requests::CartItem, responses::CheckoutResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCheckoutService = Arc<dyn CheckoutServiceTrait + Send + Sync>;

#[async_trait]
pub trait CheckoutServiceTrait {
    /// Converts a cart into a persisted order for `user_id`, who must already
    /// be authenticated.
    async fn checkout(
        &self,
        items: &[CartItem],
        user_id: i32,
    ) -> Result<CheckoutResponse, ServiceError>;
}
