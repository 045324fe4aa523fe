use crate::model::MAX_AMOUNT;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("range").with_message("Price cannot be negative".into()));
    }
    if *price > MAX_AMOUNT {
        return Err(ValidationError::new("range")
            .with_message(format!("Price cannot exceed {MAX_AMOUNT}").into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[serde(skip_deserializing)]
    pub id: Option<i32>,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let req = CreateProductRequest {
            name: "mug".into(),
            description: String::new(),
            image: String::new(),
            price: Decimal::new(-100, 2),
            quantity: 1,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_price_and_stock_are_allowed() {
        let req = CreateProductRequest {
            name: "sticker".into(),
            description: String::new(),
            image: String::new(),
            price: Decimal::ZERO,
            quantity: 0,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn price_must_fit_the_money_column() {
        let mut req = CreateProductRequest {
            name: "yacht".into(),
            description: String::new(),
            image: String::new(),
            price: MAX_AMOUNT,
            quantity: 1,
        };
        assert!(req.validate().is_ok());

        req.price = Decimal::new(100_000_000, 0);
        assert!(req.validate().is_err());
    }
}
