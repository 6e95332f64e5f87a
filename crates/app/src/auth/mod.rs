//! Authentication

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use password::{generate_password_salt, hash_password, verify_password};
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
