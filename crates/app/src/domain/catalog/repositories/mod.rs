//! Catalog Repositories

mod books;
mod copies;

pub(crate) use books::PgBooksRepository;
pub(crate) use copies::{CopyWithTitle, PgCopiesRepository};
