//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{LoginDTO, SignupDTO, TokenDTO, UserDTO};
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    // 1. Autenticare username + password (username sconosciuto e password errata sono lo stesso caso)
    // 2. Generare un token JWT con userid, username e il segreto
    // 3. Ritornare il token nell'header Authorization e nel body
    let user = match state.user.authenticate(&body.username, &body.password).await? {
        Some(user) => user,
        None => {
            warn!("Invalid credentials");
            return Err(AppError::unauthorized("Invalid username or password"));
        }
    };

    let token = encode_jwt(user.username.clone(), user.user_id, &state.jwt_secret)?;

    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| AppError::internal_server_error("Failed to build authorization header"))?;
    headers.insert(header::AUTHORIZATION, bearer);

    info!(user_id = user.user_id, "User logged in");
    Ok((
        StatusCode::OK,
        headers,
        Json(TokenDTO {
            token,
            user: UserDTO::from(user),
        }),
    ))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn signup_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupDTO>, // JSON body
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    // 1. Validare il DTO con validator (username, email, lunghezza password)
    // 2. Controllare se username o email sono già usati, CONFLICT in quel caso
    // 3. Creare l'utente: la password viene hashata dal repository
    body.validate()?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        return Err(AppError::conflict("Username already taken"));
    }
    if state.user.find_by_email(&body.email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    // il vincolo UNIQUE copre comunque la corsa tra controllo e insert (-> 409)
    let created_user = state.user.signup(&body).await?;

    info!(user_id = created_user.user_id, "User registered");
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}
