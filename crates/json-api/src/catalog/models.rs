//! Catalog response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::catalog::models::{Book, BookWithCopies, Copy};

/// Book Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookResponse {
    pub uuid: Uuid,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub publication_date: String,
    pub genre: String,
    pub page_count: i32,
    pub publisher: String,
    pub issn: String,
    pub language: String,
    pub category: String,
    pub cover_image: Option<String>,
    pub synopsis: String,
    pub featured: bool,
    pub active: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            uuid: book.uuid.into_uuid(),
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
            publication_date: book.publication_date.to_string(),
            genre: book.genre,
            page_count: book.page_count,
            publisher: book.publisher,
            issn: book.issn,
            language: book.language,
            category: book.category,
            cover_image: book.cover_image,
            synopsis: book.synopsis,
            featured: book.featured,
            active: book.active,
        }
    }
}

/// Copy Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CopyResponse {
    pub uuid: Uuid,

    /// `new` or `used`.
    pub condition: String,

    /// Price in cents.
    pub price: u64,
    pub available: bool,
    pub exhausted: bool,
}

impl From<Copy> for CopyResponse {
    fn from(copy: Copy) -> Self {
        Self {
            uuid: copy.uuid.into_uuid(),
            condition: copy.condition.as_str().to_string(),
            price: copy.price,
            available: copy.available,
            exhausted: copy.exhausted,
        }
    }
}

/// Book plus its copies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookWithCopiesResponse {
    pub book: BookResponse,
    pub copies: Vec<CopyResponse>,
}

impl From<BookWithCopies> for BookWithCopiesResponse {
    fn from(entry: BookWithCopies) -> Self {
        Self {
            book: entry.book.into(),
            copies: entry.copies.into_iter().map(Into::into).collect(),
        }
    }
}
