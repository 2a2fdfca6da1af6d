//! Follow entity - Arco diretto follower -> followed

use serde::{Deserialize, Serialize};

/// Riga della tabella `follows`: `follower_id` segue `followed_id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Follow {
    pub followed_id: i32,
    pub follower_id: i32,
}
