//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod message;
pub mod query;
pub mod user;

// Re-exports per facilitare l'import
pub use message::{CreateMessageDTO, MessageDTO};
pub use query::{TimelineQuery, UserSearchQuery};
pub use user::{CreateUserDTO, LoginDTO, ProfileDTO, SignupDTO, TokenDTO, UserDTO};
