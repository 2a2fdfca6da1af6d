//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageDTO {
    pub message_id: i32,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: i32,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            message_id: value.message_id,
            text: value.text,
            timestamp: value.timestamp,
            user_id: value.user_id,
        }
    }
}

/// DTO per creare un nuovo messaggio (senza message_id)
///
/// `user_id` e `timestamp` non arrivano dal client: li imposta il service.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateMessageDTO {
    #[validate(length(min = 1, max = 140, message = "Message text must be between 1 and 140 characters"))]
    pub text: String,

    #[serde(skip_deserializing)]
    pub user_id: i32,

    #[serde(skip_deserializing, default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_length_is_validated() {
        let ok: CreateMessageDTO = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert!(ok.validate().is_ok());

        let empty: CreateMessageDTO = serde_json::from_str(r#"{"text":""}"#).unwrap();
        assert!(empty.validate().is_err());

        let long = CreateMessageDTO {
            text: "x".repeat(141),
            user_id: 1,
            timestamp: Utc::now(),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn client_cannot_choose_author() {
        let dto: CreateMessageDTO =
            serde_json::from_str(r#"{"text":"hi","user_id":42}"#).unwrap();
        assert_eq!(dto.user_id, 0);
    }
}
