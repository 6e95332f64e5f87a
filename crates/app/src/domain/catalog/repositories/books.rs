//! Books Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::catalog::models::{Book, BookUpdate, BookUuid, NewBook};

const LIST_CATALOG_BOOKS_SQL: &str = include_str!("../sql/list_catalog_books.sql");
const GET_ACTIVE_BOOK_SQL: &str = include_str!("../sql/get_active_book.sql");
const CREATE_BOOK_SQL: &str = include_str!("../sql/create_book.sql");
const UPDATE_BOOK_SQL: &str = include_str!("../sql/update_book.sql");
const RETIRE_BOOK_SQL: &str = include_str!("../sql/retire_book.sql");
const RESTORE_BOOK_SQL: &str = include_str!("../sql/restore_book.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_catalog_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Book>, sqlx::Error> {
        query_as::<Postgres, Book>(LIST_CATALOG_BOOKS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_active_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<Book, sqlx::Error> {
        query_as::<Postgres, Book>(GET_ACTIVE_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: &NewBook,
    ) -> Result<Book, sqlx::Error> {
        query_as::<Postgres, Book>(CREATE_BOOK_SQL)
            .bind(book.uuid.into_uuid())
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.publication_year)
            .bind(SqlxDate::from(book.publication_date))
            .bind(&book.genre)
            .bind(book.page_count)
            .bind(&book.publisher)
            .bind(&book.issn)
            .bind(&book.language)
            .bind(&book.category)
            .bind(book.cover_image.as_deref())
            .bind(&book.synopsis)
            .bind(book.featured)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        update: &BookUpdate,
    ) -> Result<Book, sqlx::Error> {
        query_as::<Postgres, Book>(UPDATE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(update.title.as_deref())
            .bind(update.author.as_deref())
            .bind(update.genre.as_deref())
            .bind(update.publisher.as_deref())
            .bind(update.language.as_deref())
            .bind(update.category.as_deref())
            .bind(update.cover_image.as_deref())
            .bind(update.synopsis.as_deref())
            .bind(update.featured)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn retire_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RETIRE_BOOK_SQL)
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn restore_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTORE_BOOK_SQL)
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            publication_year: row.try_get("publication_year")?,
            publication_date: row.try_get::<SqlxDate, _>("publication_date")?.to_jiff(),
            genre: row.try_get("genre")?,
            page_count: row.try_get("page_count")?,
            publisher: row.try_get("publisher")?,
            issn: row.try_get("issn")?,
            language: row.try_get("language")?,
            category: row.try_get("category")?,
            cover_image: row.try_get("cover_image")?,
            synopsis: row.try_get("synopsis")?,
            featured: row.try_get("featured")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
