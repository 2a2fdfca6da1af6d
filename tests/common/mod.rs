//! Fixture condivisa dai test di integrazione
//!
//! Ogni test crea il proprio `TestContext`: pool, schema (`create_all`, idempotente),
//! reset di `users`, `messages`, `follows` e un `TestServer` sopra al router reale.
//! La connection string viene iniettata: di default un database SQLite in memoria,
//! oppure `TEST_DATABASE_URL` (in quel caso i test vanno eseguiti con `--test-threads=1`).

#![allow(dead_code)]

use axum::http::HeaderName;
use axum_test::{TestRequest, TestServer};
use sqlx::SqlitePool;
use std::sync::Arc;
use warbler::core::{AppState, Config, encode_jwt};
use warbler::db;
use warbler::dtos::SignupDTO;
use warbler::entities::User;

pub const TEST_PASSWORD: &str = "HASHED_PASSWORD";
pub use warbler::core::config::TEST_BCRYPT_COST;

pub struct TestContext {
    pub pool: SqlitePool,
    pub state: Arc<AppState>,
    pub server: TestServer,
}

impl TestContext {
    pub async fn new() -> Self {
        let url = std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| db::MEMORY_URL.to_string());
        let config = Config::for_tests(url);

        let pool = db::connect(&config).await.expect("Failed to connect to test database");
        db::create_all(&pool).await.expect("Failed to create tables");
        db::reset(&pool).await.expect("Failed to reset tables");

        let state = create_test_state(pool.clone(), &config);
        let server = create_test_server(state.clone());
        Self { pool, state, server }
    }

    /// Registra un utente con `TEST_PASSWORD` passando dal repository (password hashata)
    pub async fn create_user(&self, username: &str) -> User {
        self.state
            .user
            .signup(&SignupDTO {
                username: username.to_string(),
                email: format!("{}@test.com", username),
                password: TEST_PASSWORD.to_string(),
                image_url: None,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Token JWT valido per l'utente
    pub fn token_for(&self, user: &User) -> String {
        create_test_jwt(user.user_id, &user.username, &self.state.jwt_secret)
    }

    /// Aggiunge `Authorization: Bearer <token>` alla richiesta
    pub fn authorized(&self, request: TestRequest, user: &User) -> TestRequest {
        request.add_header(
            HeaderName::from_static("authorization"),
            format!("Bearer {}", self.token_for(user)),
        )
    }
}

/// Crea un AppState per i test dalla configurazione iniettata (costo bcrypt minimo)
pub fn create_test_state(pool: SqlitePool, config: &Config) -> Arc<AppState> {
    Arc::new(AppState::from_config(pool, config))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = warbler::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token per testing, valido per 24 ore
pub fn create_test_jwt(user_id: i32, username: &str, jwt_secret: &str) -> String {
    encode_jwt(username.to_string(), user_id, jwt_secret).expect("Failed to create JWT token")
}
