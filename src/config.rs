use std::env;
use std::sync::Arc;
use sea_orm::DatabaseConnection;

use crate::auth::SharedEnforcer;
use crate::middleware::rate_limiter::RateLimiter;
use crate::services::email_service::Mailer;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Prefix for links embedded in notification mail.
    pub app_base_url: String,
    pub smtp_from: String,
    pub brevo_api_key: String,
    pub mailpit_url: String,
    pub rate_limit_max: usize,
    pub rate_limit_window_secs: u64,
    /// Honour `X-Forwarded-For` for rate limiting; only behind a proxy that sets it.
    pub trust_proxy: bool,
}

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub mailer: Arc<dyn Mailer>,
    pub enforcer: SharedEnforcer,
    pub rate_limiter: Arc<RateLimiter>,
}

impl Config {
    pub fn init() -> Config {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let app_base_url = env::var("APP_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

        let smtp_from = env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@newsdesk.dev".to_string());
        let brevo_api_key = env::var("BREVO_API_KEY").unwrap_or_default();
        let mailpit_url = env::var("MAILPIT_URL").unwrap_or_else(|_| "http://localhost:8025/api/v1/send".to_string());

        let rate_limit_max = env::var("RATE_LIMIT_MAX")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<usize>()
            .expect("RATE_LIMIT_MAX must be a number");
        let rate_limit_window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .expect("RATE_LIMIT_WINDOW_SECS must be a number");
        let trust_proxy = env::var("TRUST_PROXY")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Config {
            server_host,
            server_port,
            database_url,
            jwt_secret,
            app_base_url,
            smtp_from,
            brevo_api_key,
            mailpit_url,
            rate_limit_max,
            rate_limit_window_secs,
            trust_proxy,
        }
    }
}
