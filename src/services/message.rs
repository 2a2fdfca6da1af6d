//! Message services - Creazione, lettura, cancellazione messaggi e timeline

use crate::core::{AppError, AppState};
use crate::dtos::{CreateMessageDTO, MessageDTO, TimelineQuery};
use crate::entities::User;
use crate::repositories::message::DEFAULT_TIMELINE_LIMIT;
use crate::repositories::{Create, Delete, Read};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateMessageDTO>,
) -> Result<(StatusCode, Json<MessageDTO>), AppError> {
    // autore e timestamp sono decisi dal server
    let new_message = CreateMessageDTO {
        text: body.text,
        user_id: current_user.user_id,
        timestamp: Utc::now(),
    };
    new_message.validate()?;

    let message = state.msg.create(&new_message).await?;
    info!(message_id = message.message_id, "Message created");
    Ok((StatusCode::CREATED, Json(MessageDTO::from(message))))
}

#[instrument(skip(state))]
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<i32>,
) -> Result<Json<MessageDTO>, AppError> {
    let message = state
        .msg
        .read(&message_id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;
    Ok(Json(MessageDTO::from(message)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(message_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let message = state
        .msg
        .read(&message_id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    if message.user_id != current_user.user_id {
        warn!(message_id, owner = message.user_id, "Delete attempted by non-author");
        return Err(AppError::forbidden("Only the author can delete a message"));
    }

    state.msg.delete(&message_id).await?;
    info!(message_id, "Message deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn timeline(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<TimelineQuery>,
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_TIMELINE_LIMIT)
        .clamp(1, DEFAULT_TIMELINE_LIMIT);
    let messages = state.msg.timeline(&current_user.user_id, limit).await?;
    debug!("Timeline with {} messages", messages.len());
    Ok(Json(messages.into_iter().map(MessageDTO::from).collect()))
}
