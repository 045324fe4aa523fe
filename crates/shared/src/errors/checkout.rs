use thiserror::Error;

/// Rejections raised by the checkout workflow before or while inventory is
/// committed. Every variant is reported to the caller as a client error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid quantity for the product {0}")]
    InvalidQuantity(i32),

    #[error("product {0} is not available in the store, please refresh your cart")]
    ProductUnavailable(i32),

    #[error("product {0} is out of stock")]
    OutOfStock(i32),

    #[error("order total exceeds the maximum amount of {max}", max = crate::model::MAX_AMOUNT)]
    TotalTooLarge,
}
