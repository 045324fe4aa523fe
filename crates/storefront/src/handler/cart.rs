use crate::middleware::{jwt::auth_middleware, validate::SimpleValidatedJson};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{
    abstract_trait::DynCheckoutService,
    domain::{requests::CartCheckoutRequest, responses::CheckoutResponse},
    errors::{ErrorResponse, HttpError},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/v1/cart/checkout",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = CartCheckoutRequest,
    responses(
        (status = 200, description = "Order placed", body = CheckoutResponse),
        (status = 400, description = "Empty cart, invalid quantity, unavailable or out-of-stock product", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn checkout_handler(
    Extension(service): Extension<DynCheckoutService>,
    Extension(user_id): Extension<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CartCheckoutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.checkout(&body.items, user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/v1/cart/checkout", post(checkout_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.checkout_service.clone()))
        .layer(Extension(app_state.di_container.user_service.query.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
