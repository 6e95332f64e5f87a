//! Accounts

pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use errors::AccountsServiceError;
pub use service::*;

pub(crate) use repositories::{
    PgAddressesRepository, PgPaymentMethodsRepository, PgPurchasesRepository, PgUsersRepository,
};
