//! Catalog

pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;

pub(crate) use repositories::{CopyWithTitle, PgBooksRepository, PgCopiesRepository};
