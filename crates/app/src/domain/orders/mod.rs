//! Orders

pub mod errors;
pub mod models;
mod repository;
pub mod service;
pub mod state;

pub use errors::OrdersServiceError;
pub use service::*;
pub use state::OrderState;

pub(crate) use repository::PgOrdersRepository;
