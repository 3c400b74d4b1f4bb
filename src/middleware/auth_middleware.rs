use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::repositories::user_repository::UserRepository;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::jwt_utils::JwtUtils;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;

/// Login gate: resolves the bearer token to a `users` row and injects [`CurrentUser`].
/// Permission checks happen later, per operation.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_str = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => match value.to_str() {
            Ok(s) => s,
            Err(_) => {
                return ResponseBuilder::error::<()>(
                    StatusCode::UNAUTHORIZED,
                    "AUTH_INVALID_FORMAT",
                    "Invalid Authorization header format",
                )
                .into_response();
            }
        },
        None => {
            return ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authorization header is missing",
            )
            .into_response();
        }
    };

    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return ResponseBuilder::error::<()>(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_SCHEME",
            "Invalid token format. Missing 'Bearer ' prefix",
        )
        .into_response();
    };

    let claims = match JwtUtils::validate_jwt(&state.config.jwt_secret, token) {
        Ok(data) => data.claims,
        Err(e) => {
            let (code, message) = match e.kind() {
                ErrorKind::ExpiredSignature => ("TOKEN_EXPIRED", "Token has expired"),
                ErrorKind::InvalidToken => ("TOKEN_INVALID", "Token is invalid"),
                ErrorKind::InvalidSignature => ("TOKEN_BAD_SIGNATURE", "Invalid token signature"),
                _ => ("AUTH_FAILED", "Authentication failed"),
            };

            return ResponseBuilder::error::<()>(StatusCode::UNAUTHORIZED, code, message).into_response();
        }
    };

    let user = match UserRepository::find_by_public_id(&state.db, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return ResponseBuilder::error::<()>(
                StatusCode::UNAUTHORIZED,
                "USER_NOT_FOUND",
                "User not found",
            )
            .into_response();
        }
        Err(e) => {
            tracing::error!("User lookup failed: {}", e);
            return ResponseBuilder::error::<()>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERR",
                "Database error",
            )
            .into_response();
        }
    };

    req.extensions_mut().insert(CurrentUser {
        id: user.public_id,
        db_id: user.id,
        username: user.username,
        email: user.email,
    });

    next.run(req).await
}
