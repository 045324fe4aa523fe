use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(user_id: i32, exp: usize, iat: usize) -> Self {
        Claims { user_id, exp, iat }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
    pub expiration_secs: i64,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str, expiration_secs: i64) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
            expiration_secs,
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i32) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + Duration::seconds(self.expiration_secs)).timestamp() as usize;

        let claims = Claims::new(user_id, exp, iat);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str) -> Result<i32, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::Jwt(err),
            })?;

        Ok(token_data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_user_id() {
        let jwt = JwtConfig::new("secret", 60);
        let token = jwt.generate_token(42).unwrap();

        assert_eq!(jwt.verify_token(&token).unwrap(), 42);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtConfig::new("secret", 60).generate_token(1).unwrap();

        let err = JwtConfig::new("other", 60).verify_token(&token).unwrap_err();
        assert!(matches!(err, ServiceError::Jwt(_)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        // default validation leeway is 60 seconds
        let token = JwtConfig::new("secret", -120).generate_token(1).unwrap();

        let err = JwtConfig::new("secret", 60).verify_token(&token).unwrap_err();
        assert!(matches!(err, ServiceError::TokenExpired));
    }
}
