//! User DTOs - Data Transfer Objects per utenti

use crate::entities::User;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    /// Username: lettere, cifre, underscore, punto e trattino
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap();
}

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDTO {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        // la password non viene mai esposta al client
        Self {
            id: value.user_id,
            username: value.username,
            email: value.email,
            image_url: value.image_url,
            header_image_url: value.header_image_url,
            bio: value.bio,
            location: value.location,
        }
    }
}

/// Profilo utente con i contatori delle relazioni
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileDTO {
    #[serde(flatten)]
    pub user: UserDTO,
    pub messages: i64,
    pub followers: i64,
    pub following: i64,
}

/// DTO per la registrazione, password in chiaro (viene hashata dal repository)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SignupDTO {
    #[validate(
        length(min = 3, max = 30, message = "Username must be between 3 and 30 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, digits, '_', '.' and '-'")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(max = 255))]
    pub image_url: Option<String>,
}

/// DTO per creare un nuovo utente (senza user_id, password già hashata)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateUserDTO {
    pub email: String,
    pub username: String,
    pub password: String,
    pub image_url: Option<String>,
}

/// DTO per il login (solo username e password)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

/// Risposta del login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenDTO {
    pub token: String,
    pub user: UserDTO,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, email: &str, password: &str) -> SignupDTO {
        SignupDTO {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(signup("test_user", "test@test.com", "secret1").validate().is_ok());
    }

    #[test]
    fn invalid_signups_are_rejected() {
        assert!(signup("ab", "test@test.com", "secret1").validate().is_err());
        assert!(signup("bad name", "test@test.com", "secret1").validate().is_err());
        assert!(signup("testuser", "not-an-email", "secret1").validate().is_err());
        assert!(signup("testuser", "test@test.com", "123").validate().is_err());
    }

    #[test]
    fn user_dto_hides_password() {
        let user = User {
            user_id: 7,
            email: "a@b.com".to_string(),
            username: "alice".to_string(),
            password: "$2b$04$hash".to_string(),
            image_url: "/img.png".to_string(),
            header_image_url: "/hdr.png".to_string(),
            bio: None,
            location: Some("Roma".to_string()),
        };
        let json = serde_json::to_value(UserDTO::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["id"], 7);
        assert_eq!(json["location"], "Roma");
    }
}
