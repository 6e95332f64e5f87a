//! Octavo Domain Concerns

pub mod accounts;
pub mod carts;
pub mod catalog;
pub mod orders;
pub mod reservations;
pub mod returns;
pub mod support;
