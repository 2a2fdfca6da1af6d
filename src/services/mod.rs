//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod message;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{login_user, signup_user};
pub use message::{create_message, delete_message, get_message, timeline};
pub use user::{
    delete_my_account, follow_user, get_user_profile, list_followers, list_following,
    list_user_messages, search_user_with_username, stop_following_user,
};

use crate::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

/// Root endpoint - pagina iniziale, accessibile senza autenticazione
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "name": "Warbler",
            "message": "Sign up or log in to see your timeline",
        })),
    )
}
