use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::{DynJwtService, DynUserQueryService},
    errors::{HttpError, ServiceError},
};
use tracing::warn;

fn permission_denied() -> HttpError {
    HttpError::Unauthorized("permission denied".to_string())
}

/// Accepts `Authorization: Bearer <token>`, a bare token in the same header,
/// or a `token` cookie. On success the caller's user id is stored as an `i32`
/// request extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    Extension(users): Extension<DynUserQueryService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .map(|auth_value| {
            auth_value
                .strip_prefix("Bearer ")
                .unwrap_or(auth_value)
                .trim()
                .to_owned()
        })
        .filter(|token| !token.is_empty())
        .or_else(|| cookie_jar.get("token").map(|cookie| cookie.value().to_string()));

    let Some(token) = token else {
        warn!("🔒 Request without token rejected");
        return Err(permission_denied());
    };

    let user_id = jwt.verify_token(&token).map_err(|err| {
        warn!("🔒 Token rejected: {err}");
        permission_denied()
    })?;

    match users.find_by_id(user_id).await {
        Ok(_) => {}
        Err(ServiceError::NotFound(_)) => {
            warn!("🔒 Token for unknown user {user_id} rejected");
            return Err(permission_denied());
        }
        Err(err) => return Err(HttpError::from(err)),
    }

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}
