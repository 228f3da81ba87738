use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use chrono::Duration;
use marketplace_service::domain::access::models::AccessPolicy;
use marketplace_service::domain::access::service::AccessControl;
use marketplace_service::domain::account::service::AccountService;
use marketplace_service::domain::audit::service::AuditService;
use marketplace_service::domain::product::service::AuditPolicy;
use marketplace_service::domain::product::service::ProductService;
use marketplace_service::inbound::http::router::create_router;
use marketplace_service::inbound::http::router::AppState;
use marketplace_service::outbound::repositories::InMemoryAccountRepository;
use marketplace_service::outbound::repositories::InMemoryAuditRepository;
use marketplace_service::outbound::repositories::InMemoryProductRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "Secret123!";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_token_ttl(Duration::hours(24)).await
    }

    /// Spawn with a custom token lifetime. A negative lifetime mints tokens
    /// that are already expired.
    pub async fn spawn_with_token_ttl(token_ttl: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, token_ttl));

        let audit_service = Arc::new(AuditService::new(Arc::new(InMemoryAuditRepository::new())));
        let product_service = Arc::new(ProductService::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::clone(&audit_service),
            AuditPolicy::BestEffort,
        ));
        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::clone(&authenticator),
        ));
        let access_control = Arc::new(AccessControl::new(
            authenticator,
            AccessPolicy::marketplace_default(),
        ));

        let router = create_router(AppState {
            account_service,
            product_service,
            audit_service,
            access_control,
        });

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register an account and return the response body.
    pub async fn register(&self, email: &str, role: &str) -> Value {
        let response = self
            .post("/auth/signup")
            .json(&json!({
                "email": email,
                "password": PASSWORD,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Register an account and return its bearer token.
    pub async fn token_for(&self, email: &str, role: &str) -> String {
        let body = self.register(email, role).await;
        body["data"]["token"]
            .as_str()
            .expect("token missing from signup response")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin@example.com", "admin").await
    }

    /// Create a product as `token` and return its id.
    pub async fn create_product(&self, token: &str, name: &str, price: f64, stock: i64) -> String {
        let response = self
            .post("/products")
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "description": format!("{} description", name),
                "price": price,
                "stock": stock,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

/// Assert the error envelope carries `key`.
pub fn assert_error_key(body: &Value, key: &str) {
    assert_eq!(body["status"], false);
    assert_eq!(body["errors"][0]["key"], key, "unexpected body: {}", body);
}
