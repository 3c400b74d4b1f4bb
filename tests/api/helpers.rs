use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use casbin::{MemoryAdapter, MgmtApi};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use newsdesk::auth::{build_enforcer, SharedEnforcer};
use newsdesk::config::{AppState, Config};
use newsdesk::entities::author;
use newsdesk::middleware::rate_limiter::RateLimiter;
use newsdesk::repositories::user_repository::UserRepository;
use newsdesk::seeders::casbin_seeder::seed_casbin_policies;
use newsdesk::services::email_service::Mailer;
use newsdesk::telemetry::{get_subscriber, init_subscriber};
use newsdesk::utils::jwt_utils::JwtUtils;
use once_cell::sync::Lazy;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, NotSet, Set};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

const JWT_SECRET: &str = "integration-test-secret";

static TRACING: Lazy<()> = Lazy::new(|| {
    // TEST_LOG=true to see server logs while debugging a test
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("debug", std::io::stdout));
    } else {
        init_subscriber(get_subscriber("debug", std::io::sink));
    }
});

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Captures outbound mail instead of talking to Brevo/Mailpit.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
    attempts: AtomicUsize,
    // 1-based attempt number that fails; later attempts go through again
    fail_on: Mutex<Option<usize>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_from_now_on(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn fail_on_send(&self, attempt: usize) {
        *self.fail_on.lock().unwrap() = Some(attempt);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<(), String> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) || *self.fail_on.lock().unwrap() == Some(attempt) {
            return Err("mail transport is down".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub db_id: i64,
    pub email: String,
    pub token: String,
}

pub struct TestApp {
    pub address: String,
    pub db: DatabaseConnection,
    pub enforcer: SharedEnforcer,
    pub mailer: Arc<RecordingMailer>,
    pub client: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // One pooled connection: every connection to `sqlite::memory:` is its own database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("Failed to open SQLite");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    let enforcer = build_enforcer(MemoryAdapter::default())
        .await
        .expect("Failed to build enforcer");
    seed_casbin_policies(&enforcer).await.expect("Failed to seed policies");

    let config = Config {
        server_host: "127.0.0.1".to_string(),
        server_port: port,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        app_base_url: address.clone(),
        smtp_from: "noreply@newsdesk.test".to_string(),
        brevo_api_key: String::new(),
        mailpit_url: "http://127.0.0.1:9/api/v1/send".to_string(),
        rate_limit_max: 10_000,
        rate_limit_window_secs: 60,
        trust_proxy: false,
    };

    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState {
        db: db.clone(),
        rate_limiter: Arc::new(RateLimiter::from_config(&config)),
        config: Arc::new(config),
        mailer: mailer.clone(),
        enforcer: enforcer.clone(),
    };

    tokio::spawn(newsdesk::startup::run(listener, state));

    TestApp {
        address,
        db,
        enforcer,
        mailer,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    /// Inserts a user, optionally grants `role`, and mints a bearer token for it.
    pub async fn create_user(&self, username: &str, role: Option<&str>) -> TestUser {
        self.create_user_with_email(username, &format!("{}@newsdesk.test", username), role)
            .await
    }

    /// Addresses are not unique, so several accounts may share one.
    pub async fn create_user_with_email(&self, username: &str, email: &str, role: Option<&str>) -> TestUser {
        let email = email.to_string();
        let user = UserRepository::create(&self.db, username.to_string(), email.clone())
            .await
            .expect("Failed to create user");

        if let Some(role) = role {
            self.enforcer
                .write()
                .await
                .add_grouping_policy(vec![user.public_id.to_string(), role.to_string()])
                .await
                .expect("Failed to grant role");
        }

        let token = JwtUtils::generate_jwt(JWT_SECRET, user.public_id, username, 30)
            .expect("Failed to mint token");

        TestUser {
            id: user.public_id,
            db_id: user.id,
            email,
            token,
        }
    }

    pub async fn create_author(&self, name: &str) -> Uuid {
        author::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .expect("Failed to create author")
        .public_id
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    /// GET with url-encoded query parameters.
    pub async fn get_query(&self, path: &str, query: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, token: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self.client.post(format!("{}{}", self.address, path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, token: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self.client.put(format!("{}{}", self.address, path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.delete(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn subscribe_to_news(&self, user: &TestUser, author_id: Uuid) {
        let response = self
            .post_json(
                "/api/news/subscriptions",
                Some(&user.token),
                &json!({"author_id": author_id, "action": "subscribe"}),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    /// `kind` is the path segment: `articles` or `news`.
    pub async fn publish(&self, kind: &str, token: &str, title: &str, author_id: Uuid, rating: i64) -> reqwest::Response {
        self.post_json(
            &format!("/api/{}/create", kind),
            Some(token),
            &json!({
                "title": title,
                "text": format!("Body of {}", title),
                "rating": rating,
                "author_id": author_id,
            }),
        )
        .await
    }

    /// Publishes and returns the created item's id, asserting success.
    pub async fn publish_ok(&self, kind: &str, token: &str, title: &str, author_id: Uuid, rating: i64) -> Uuid {
        let response = self.publish(kind, token, title, author_id, rating).await;
        assert_eq!(response.status().as_u16(), 201, "publishing {:?} failed", title);
        let body = json_body(response).await;
        body["data"]["id"].as_str().unwrap().parse().unwrap()
    }
}

pub async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.expect("Response body is not JSON")
}

pub fn titles(body: &Value) -> Vec<String> {
    body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_string())
        .collect()
}
