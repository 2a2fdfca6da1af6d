//! MessageRepository - Repository per la gestione dei messaggi

use super::{Create, Delete, Read};
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use sqlx::{Error, SqlitePool};

pub const DEFAULT_TIMELINE_LIMIT: i64 = 100;

// MESSAGE REPO
pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Get all messages authored by a user, newest first
    pub async fn find_many_by_user_id(&self, user_id: &i32) -> Result<Vec<Message>, Error> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT message_id, text, timestamp, user_id
            FROM messages
            WHERE user_id = ?
            ORDER BY timestamp DESC, message_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }

    /// Home feed: messaggi dell'utente e degli utenti che segue, dal più recente
    ///
    /// # Arguments
    /// * `user_id` - L'utente di cui costruire la timeline
    /// * `limit` - Numero massimo di messaggi da ritornare
    pub async fn timeline(&self, user_id: &i32, limit: i64) -> Result<Vec<Message>, Error> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT message_id, text, timestamp, user_id
            FROM messages
            WHERE user_id = ?
               OR user_id IN (SELECT followed_id FROM follows WHERE follower_id = ?)
            ORDER BY timestamp DESC, message_id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (text, timestamp, user_id)
            VALUES (?, ?, ?)
            RETURNING message_id, text, timestamp, user_id
            "#,
        )
        .bind(&data.text)
        .bind(data.timestamp)
        .bind(data.user_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(message)
    }
}

impl Read<Message, i32> for MessageRepository {
    async fn read(&self, id: &i32) -> Result<Option<Message>, Error> {
        let message = sqlx::query_as::<_, Message>(
            "SELECT message_id, text, timestamp, user_id FROM messages WHERE message_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(message)
    }
}

impl Delete<i32> for MessageRepository {
    async fn delete(&self, id: &i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM messages WHERE message_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::dtos::CreateUserDTO;
    use crate::repositories::{FollowRepository, UserRepository};
    use chrono::{Duration, Utc};

    struct Fixture {
        users: UserRepository,
        follows: FollowRepository,
        messages: MessageRepository,
    }

    async fn fixture() -> Fixture {
        let pool = db::connect_in_memory().await.unwrap();
        Fixture {
            users: UserRepository::new(pool.clone()),
            follows: FollowRepository::new(pool.clone()),
            messages: MessageRepository::new(pool),
        }
    }

    async fn user(f: &Fixture, name: &str) -> i32 {
        f.users
            .create(&CreateUserDTO {
                email: format!("{name}@test.com"),
                username: name.to_string(),
                password: "HASHED_PASSWORD".to_string(),
                image_url: None,
            })
            .await
            .unwrap()
            .user_id
    }

    async fn post(f: &Fixture, user_id: i32, text: &str, minutes_ago: i64) -> Message {
        f.messages
            .create(&CreateMessageDTO {
                text: text.to_string(),
                user_id,
                timestamp: Utc::now() - Duration::minutes(minutes_ago),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_and_read_back() {
        let f = fixture().await;
        let alice = user(&f, "alice").await;
        let created = post(&f, alice, "hello warbler", 0).await;

        let read = f.messages.read(&created.message_id).await.unwrap().unwrap();
        assert_eq!(read.text, "hello warbler");
        assert_eq!(read.user_id, alice);
        assert_eq!(f.users.count_messages(&alice).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn timeline_includes_self_and_followed_only() {
        let f = fixture().await;
        let alice = user(&f, "alice").await;
        let bob = user(&f, "bob").await;
        let carol = user(&f, "carol").await;
        f.follows.follow(&alice, &bob).await.unwrap();

        post(&f, alice, "mine", 3).await;
        post(&f, bob, "from bob", 2).await;
        post(&f, carol, "from carol", 1).await;

        let texts: Vec<String> = f
            .messages
            .timeline(&alice, DEFAULT_TIMELINE_LIMIT)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["from bob".to_string(), "mine".to_string()]);

        let limited = f.messages.timeline(&alice, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn messages_are_deleted_with_their_author() {
        let f = fixture().await;
        let alice = user(&f, "alice").await;
        let msg = post(&f, alice, "bye", 0).await;

        f.users.delete(&alice).await.unwrap();
        assert!(f.messages.read(&msg.message_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn text_over_limit_is_rejected_by_schema() {
        let f = fixture().await;
        let alice = user(&f, "alice").await;
        let result = f
            .messages
            .create(&CreateMessageDTO {
                text: "x".repeat(141),
                user_id: alice,
                timestamp: Utc::now(),
            })
            .await;
        assert!(result.is_err());
    }
}
