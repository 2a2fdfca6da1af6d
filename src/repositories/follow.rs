//! FollowRepository - Relazione follows tra utenti (self-join diretto)
//!
//! Ogni arco `follower_id -> followed_id` è una riga di `follows`. Le scritture vanno
//! direttamente sul pool, quindi un follow è visibile ai predicati appena `follow` ritorna.
//! Le liste `following` / `followers` sono snapshot: non si aggiornano da sole.

use crate::entities::{Follow, User};
use sqlx::{Error, SqlitePool};
use tracing::{debug, instrument};

pub struct FollowRepository {
    connection_pool: SqlitePool,
}

impl FollowRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// `follower_id` inizia a seguire `followed_id`.
    ///
    /// Idempotente: un arco già presente non viene duplicato.
    /// Ritorna l'arco se è stato creato ora, `None` se esisteva già.
    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: &i32, followed_id: &i32) -> Result<Option<Follow>, Error> {
        let edge = sqlx::query_as::<_, Follow>(
            "INSERT INTO follows (followed_id, follower_id) VALUES (?, ?) \
             ON CONFLICT (followed_id, follower_id) DO NOTHING \
             RETURNING followed_id, follower_id",
        )
        .bind(followed_id)
        .bind(follower_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        debug!(created = edge.is_some(), "Follow edge stored");
        Ok(edge)
    }

    /// Rimuove l'arco `follower_id -> followed_id`. Ritorna `true` se esisteva.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower_id: &i32, followed_id: &i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM follows WHERE followed_id = ? AND follower_id = ?")
            .bind(followed_id)
            .bind(follower_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Does `user_id` follow `other_id`?
    pub async fn is_following(&self, user_id: &i32, other_id: &i32) -> Result<bool, Error> {
        self.edge_exists(user_id, other_id).await
    }

    /// Is `user_id` followed by `other_id`?
    pub async fn is_followed_by(&self, user_id: &i32, other_id: &i32) -> Result<bool, Error> {
        self.edge_exists(other_id, user_id).await
    }

    /// Users that `user_id` follows
    pub async fn following(&self, user_id: &i32) -> Result<Vec<User>, Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.user_id, u.email, u.username, u.password, u.image_url, u.header_image_url, u.bio, u.location \
             FROM follows f JOIN users u ON u.user_id = f.followed_id \
             WHERE f.follower_id = ? ORDER BY u.username",
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Users following `user_id`
    pub async fn followers(&self, user_id: &i32) -> Result<Vec<User>, Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.user_id, u.email, u.username, u.password, u.image_url, u.header_image_url, u.bio, u.location \
             FROM follows f JOIN users u ON u.user_id = f.follower_id \
             WHERE f.followed_id = ? ORDER BY u.username",
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    async fn edge_exists(&self, follower_id: &i32, followed_id: &i32) -> Result<bool, Error> {
        let found: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = ? AND followed_id = ?)",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(found != 0)
    }
}
