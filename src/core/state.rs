//! Application State - Stato condiviso dell'applicazione
//!
//! Contiene tutti i repository e la configurazione necessaria alle route e ai middleware.

use crate::core::Config;
use crate::repositories::{FollowRepository, MessageRepository, UserRepository};
use sqlx::SqlitePool;

/// Stato dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per la gestione dei messaggi
    pub msg: MessageRepository,

    /// Repository per la relazione follows
    pub follows: FollowRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,
}

impl AppState {
    /// Crea una nuova istanza di AppState a partire dalla configurazione:
    /// JWT secret e costo bcrypt vengono da `Config`.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni condiviso
    /// * `config` - Configurazione caricata (`from_env`) o iniettata (`for_tests`)
    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        Self::with_bcrypt_cost(pool, config.jwt_secret.clone(), config.bcrypt_cost)
    }

    /// Inizializza i repository con il costo bcrypt usato per hashare le password in signup
    pub fn with_bcrypt_cost(pool: SqlitePool, jwt_secret: String, bcrypt_cost: u32) -> Self {
        Self {
            user: UserRepository::with_bcrypt_cost(pool.clone(), bcrypt_cost),
            msg: MessageRepository::new(pool.clone()),
            follows: FollowRepository::new(pool),
            jwt_secret,
        }
    }
}
