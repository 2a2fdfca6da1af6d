//! User services - Gestione utenti e relazione follows

use crate::core::{AppError, AppState};
use crate::dtos::{MessageDTO, ProfileDTO, UserDTO, UserSearchQuery};
use crate::entities::User;
use crate::repositories::{Delete, Read};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::future::try_join3;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Legge l'utente o ritorna NOT_FOUND
async fn require_user(state: &AppState, user_id: i32) -> Result<User, AppError> {
    state.user.read(&user_id).await?.ok_or_else(|| {
        warn!(user_id, "User not found");
        AppError::not_found("User not found")
    })
}

#[instrument(skip(state), fields(search = %params.search))]
pub async fn search_user_with_username(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserSearchQuery>, // query params /users?search=username
) -> Result<Json<Vec<UserDTO>>, AppError> {
    debug!("Searching users by username prefix");
    let users = state.user.search_by_username_partial(&params.search).await?;
    info!("Found {} users matching search criteria", users.len());
    let users_dto = users.into_iter().map(UserDTO::from).collect::<Vec<_>>();
    Ok(Json(users_dto))
}

#[instrument(skip(state))]
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>, // parametro dalla URL /users/{user_id}
) -> Result<Json<ProfileDTO>, AppError> {
    let user = require_user(&state, user_id).await?;

    let (messages, followers, following) = try_join3(
        state.user.count_messages(&user_id),
        state.user.count_followers(&user_id),
        state.user.count_following(&user_id),
    )
    .await?;

    Ok(Json(ProfileDTO {
        user: UserDTO::from(user),
        messages,
        followers,
        following,
    }))
}

#[instrument(skip(state))]
pub async fn list_following(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    require_user(&state, user_id).await?;
    let users = state.follows.following(&user_id).await?;
    Ok(Json(users.into_iter().map(UserDTO::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_followers(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    require_user(&state, user_id).await?;
    let users = state.follows.followers(&user_id).await?;
    Ok(Json(users.into_iter().map(UserDTO::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_user_messages(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    require_user(&state, user_id).await?;
    let messages = state.msg.find_many_by_user_id(&user_id).await?;
    Ok(Json(messages.into_iter().map(MessageDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn follow_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Path(followed_id): Path<i32>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    if followed_id == current_user.user_id {
        warn!("User tried to follow themselves");
        return Err(AppError::bad_request("You cannot follow yourself"));
    }
    require_user(&state, followed_id).await?;

    match state
        .follows
        .follow(&current_user.user_id, &followed_id)
        .await?
    {
        Some(edge) => info!(
            followed_id = edge.followed_id,
            follower_id = edge.follower_id,
            "Follow stored"
        ),
        None => debug!(followed_id, "Already following"),
    }

    let following = state.follows.following(&current_user.user_id).await?;
    Ok(Json(following.into_iter().map(UserDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn stop_following_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(followed_id): Path<i32>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    require_user(&state, followed_id).await?;

    let removed = state
        .follows
        .unfollow(&current_user.user_id, &followed_id)
        .await?;
    info!(followed_id, removed, "Follow removed");

    let following = state.follows.following(&current_user.user_id).await?;
    Ok(Json(following.into_iter().map(UserDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, username = %current_user.username))]
pub async fn delete_my_account(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    info!("User account deletion initiated");
    // messaggi e archi follows vengono eliminati in cascata dal database
    if !state.user.delete(&current_user.user_id).await? {
        return Err(AppError::not_found("User not found"));
    }

    info!("Account deleted successfully");
    Ok((StatusCode::OK, "Account deleted successfully"))
}
