use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use newsdesk::config::{AppState, Config};
use newsdesk::middleware::rate_limiter::RateLimiter;
use newsdesk::services::email_service::EmailService;
use newsdesk::{auth, seeders, startup, telemetry};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv().ok();

    telemetry::init_subscriber(telemetry::get_subscriber("newsdesk=info,tower_http=info", std::io::stdout));

    let cfg = Config::init();
    tracing::info!("Starting Newsdesk...");

    // 1. Database Connection
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("Failed to connect to Database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    tracing::info!("Database connected and migrated");

    // 2. Casbin Initialization
    let enforcer = auth::setup_casbin(db.clone())
        .await
        .expect("Failed to initialize Casbin");

    // 3. Database Seeding
    if let Err(e) = seeders::run_seeders(&db, &enforcer).await {
        tracing::error!("Seeding failed: {}", e);
    }

    // 4. Build App State
    let state = AppState {
        db,
        config: Arc::new(cfg.clone()),
        mailer: Arc::new(EmailService::new(&cfg)),
        enforcer,
        rate_limiter: Arc::new(RateLimiter::from_config(&cfg)),
    };

    // 5. Start Server
    let addr: SocketAddr = format!("{}:{}", cfg.server_host, cfg.server_port)
        .parse()
        .expect("Invalid address");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    startup::run(listener, state).await
}
