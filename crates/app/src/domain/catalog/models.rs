//! Catalog Models

use std::str::FromStr;

use jiff::{Timestamp, civil::Date};

use crate::uuids::TypedUuid;

/// Book UUID
pub type BookUuid = TypedUuid<Book>;

/// Copy UUID; doubles as the copy's public code.
pub type CopyUuid = TypedUuid<Copy>;

/// Book Model
#[derive(Debug, Clone)]
pub struct Book {
    pub uuid: BookUuid,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub publication_date: Date,
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
    pub created_at: Timestamp,
}

/// New Book Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub uuid: BookUuid,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub publication_date: Date,
    pub genre: String,
    pub page_count: i32,
    pub publisher: String,
    pub issn: String,
    pub language: String,
    pub category: String,
    pub cover_image: Option<String>,
    pub synopsis: String,
    pub featured: bool,
}

/// Partial book update; absent fields keep their value. Copies are managed
/// separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub synopsis: Option<String>,
    pub featured: Option<bool>,
}

/// Physical condition of a sellable copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyCondition {
    #[default]
    New,
    Used,
}

impl CopyCondition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }
}

impl FromStr for CopyCondition {
    type Err = UnknownCopyCondition;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "used" => Ok(Self::Used),
            other => Err(UnknownCopyCondition(other.to_string())),
        }
    }
}

/// Condition string not recognized when decoding.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown copy condition {0:?}")]
pub struct UnknownCopyCondition(pub String);

/// One sellable unit of a book.
#[derive(Debug, Clone)]
pub struct Copy {
    pub uuid: CopyUuid,
    pub book_uuid: BookUuid,
    pub condition: CopyCondition,
    pub price: u64,
    pub available: bool,
    pub exhausted: bool,
    pub created_at: Timestamp,
}

impl Copy {
    /// A copy can be sold or reserved only while available and not exhausted.
    #[must_use]
    pub const fn sellable(&self) -> bool {
        self.available && !self.exhausted
    }
}

/// Batch of identical copies to add to a book.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCopies {
    pub count: u32,
    pub price: u64,
    pub condition: CopyCondition,
}

/// A book together with (a subset of) its copies.
#[derive(Debug, Clone)]
pub struct BookWithCopies {
    pub book: Book,
    pub copies: Vec<Copy>,
}
