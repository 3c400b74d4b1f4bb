use crate::models::auth_model::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

/// Bearer tokens are minted by the identity service that shares `JWT_SECRET`;
/// this service only verifies them. `generate_jwt` exists for tooling and tests.
pub struct JwtUtils;

impl JwtUtils {
    pub fn generate_jwt(
        secret: &str,
        user_id: Uuid,
        username: &str,
        expires_in_minutes: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expire = now + Duration::minutes(expires_in_minutes);
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp: expire.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
    }

    pub fn validate_jwt(secret: &str, token: &str) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        decode::<Claims>(token, &decoding_key, &validation)
    }
}
