//! Warbler - libreria del server, espone i moduli principali per i test

pub mod core;
pub mod db;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, auth};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .nest("/users", configure_user_routes(state.clone()))
        .nest("/messages", configure_message_routes(state.clone()))
        .merge(configure_timeline_routes(state.clone()))
        .with_state(state)
}

/// Configura le routes di autenticazione (login, signup)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/signup", post(signup_user))
}

/// Configura le routes per la gestione degli utenti
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    let public_routes = Router::new()
        .route("/", get(search_user_with_username))
        .route("/{user_id}", get(get_user_profile))
        .route("/{user_id}/following", get(list_following))
        .route("/{user_id}/followers", get(list_followers))
        .route("/{user_id}/messages", get(list_user_messages));

    let private_routes = Router::new()
        .route("/follow/{user_id}", post(follow_user))
        .route("/stop-following/{user_id}", post(stop_following_user))
        .route("/me", delete(delete_my_account))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(private_routes)
}

/// Configura le routes per la gestione dei messaggi
fn configure_message_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    let public_routes = Router::new().route("/{message_id}", get(get_message));

    let private_routes = Router::new()
        .route("/", post(create_message))
        .route("/{message_id}", delete(delete_message))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(private_routes)
}

/// Home feed dell'utente autenticato
fn configure_timeline_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/timeline", get(timeline))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
