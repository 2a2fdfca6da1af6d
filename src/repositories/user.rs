//! UserRepository - Repository per la gestione degli utenti

use super::{Create, Delete, Read};
use crate::dtos::{CreateUserDTO, SignupDTO};
use crate::entities::User;
use crate::entities::user::DEFAULT_IMAGE_URL;
use bcrypt::DEFAULT_COST;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument, warn};

const USER_COLUMNS: &str =
    "user_id, email, username, password, image_url, header_image_url, bio, location";

// USER REPO
pub struct UserRepository {
    connection_pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self::with_bcrypt_cost(connection_pool, DEFAULT_COST)
    }

    /// Come `new`, ma con un costo bcrypt esplicito (i test usano il minimo)
    pub fn with_bcrypt_cost(connection_pool: SqlitePool, bcrypt_cost: u32) -> UserRepository {
        Self {
            connection_pool,
            bcrypt_cost,
        }
    }

    /// considero l'username univoco
    /// Find user by exact username match
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }

    /// Find user by exact email match
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }

    /// Search users by username prefix (for search functionality), at most 10 results.
    ///
    /// Il confronto ignora maiuscole/minuscole ASCII (`LIKE` di SQLite): `ali` trova `Alice`.
    pub async fn search_by_username_partial(&self, username_pattern: &str) -> Result<Vec<User>, Error> {
        // `%` e `_` dell'input vanno trattati come caratteri letterali
        let escaped = username_pattern
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("{}%", escaped);
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username LIKE ? ESCAPE '\\' ORDER BY username LIMIT 10"
        ))
        .bind(pattern)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(users)
    }

    /// Registra un nuovo utente hashando la password in chiaro.
    ///
    /// Il vincolo di unicità su email e username è garantito dal database.
    #[instrument(skip(self, data), fields(username = %data.username))]
    pub async fn signup(&self, data: &SignupDTO) -> Result<User, Error> {
        let cost = self.bcrypt_cost;
        let password = data.password.clone();
        // bcrypt è CPU-bound, non blocchiamo il runtime
        let hashed = tokio::task::spawn_blocking(move || User::hash_password_with_cost(&password, cost))
            .await
            .map_err(|e| Error::Encode(Box::new(e)))?
            .map_err(|e| Error::Encode(Box::new(e)))?;

        let user = self
            .create(&CreateUserDTO {
                email: data.email.clone(),
                username: data.username.clone(),
                password: hashed,
                image_url: data.image_url.clone(),
            })
            .await?;

        info!(user_id = user.user_id, "User signed up");
        Ok(user)
    }

    /// Cerca l'utente per username e verifica la password candidata contro l'hash.
    ///
    /// Ritorna `Ok(None)` sia per username sconosciuto sia per password errata.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, Error> {
        let Some(user) = self.find_by_username(username).await? else {
            debug!("Unknown username");
            return Ok(None);
        };

        if user.verify_password(password) {
            debug!(user_id = user.user_id, "Password verified");
            Ok(Some(user))
        } else {
            warn!(user_id = user.user_id, "Password mismatch");
            Ok(None)
        }
    }

    /// Number of messages authored by the user
    pub async fn count_messages(&self, user_id: &i32) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Number of users following this user
    pub async fn count_followers(&self, user_id: &i32) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE followed_id = ?")
            .bind(user_id)
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Number of users this user follows
    pub async fn count_following(&self, user_id: &i32) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = ?")
            .bind(user_id)
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, username, password, image_url) \
             VALUES (?, ?, ?, COALESCE(?, ?)) RETURNING {USER_COLUMNS}"
        ))
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.password)
        .bind(&data.image_url)
        .bind(DEFAULT_IMAGE_URL)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Read<User, i32> for UserRepository {
    async fn read(&self, id: &i32) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Delete<i32> for UserRepository {
    /// Hard delete: messaggi e archi follows vengono rimossi da ON DELETE CASCADE
    async fn delete(&self, user_id: &i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
