//! Support board

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::SupportServiceError;
pub use service::*;
