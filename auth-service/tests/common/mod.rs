use std::sync::Arc;

use auth::Authenticator;
use auth::SigningKey;
use auth::TokenSettings;
use auth_service::account::models::EmailAddress;
use auth_service::account::models::Role;
use auth_service::account::models::SeedAccountCommand;
use auth_service::account::ports::AuthServicePort;
use auth_service::domain::account::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryAccountRepository;
use chrono::Duration;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_EMAIL: &str = "testuser@test.com";
pub const TEST_PASSWORD: &str = "password123";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Validator-side view of the shared key, as a downstream service holds it
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(authenticator());

        let auth_service = AuthService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::clone(&authenticator),
        )
        .expect("Failed to create auth service");

        auth_service
            .seed_account(SeedAccountCommand::new(
                EmailAddress::new(TEST_EMAIL.to_string()).unwrap(),
                TEST_PASSWORD.to_string(),
                Role::new("ADMIN".to_string()).unwrap(),
            ))
            .await
            .expect("Failed to seed test account");

        let router = create_router(Arc::new(auth_service));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Authenticator over the shared test key, zero leeway
pub fn authenticator() -> Authenticator {
    let key = SigningKey::from_secret(TEST_SECRET).expect("Valid test secret");
    let settings =
        TokenSettings::new(Duration::hours(10), Duration::zero()).expect("Valid token settings");
    Authenticator::new(Arc::new(key), settings)
}
