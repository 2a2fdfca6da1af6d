//! Query DTOs - Data Transfer Objects per query di ricerca

use serde::{Deserialize, Serialize};

/// DTO per query parameters di ricerca utenti
#[derive(Serialize, Deserialize, Debug)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub search: String,
}

/// DTO per query parameters della timeline
#[derive(Serialize, Deserialize, Debug)]
pub struct TimelineQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}
