//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Book, BookUpdate, BookUuid, BookWithCopies, Copy, CopyUuid, NewBook, NewCopies},
        repositories::{PgBooksRepository, PgCopiesRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    books_repository: PgBooksRepository,
    copies_repository: PgCopiesRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            books_repository: PgBooksRepository::new(),
            copies_repository: PgCopiesRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_catalog(&self) -> Result<Vec<BookWithCopies>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let books = self.books_repository.list_catalog_books(&mut tx).await?;

        let mut catalog = Vec::with_capacity(books.len());

        for book in books {
            let copies = self
                .copies_repository
                .list_sellable_copies_for_book(&mut tx, book.uuid)
                .await?;

            catalog.push(BookWithCopies { book, copies });
        }

        tx.commit().await?;

        Ok(catalog)
    }

    async fn get_book(&self, book: BookUuid) -> Result<BookWithCopies, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let book = self.books_repository.get_active_book(&mut tx, book).await?;

        let copies = self
            .copies_repository
            .list_copies_for_book(&mut tx, book.uuid)
            .await?;

        tx.commit().await?;

        Ok(BookWithCopies { book, copies })
    }

    async fn create_book(
        &self,
        book: NewBook,
        initial_copies: NewCopies,
    ) -> Result<BookWithCopies, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.books_repository.create_book(&mut tx, &book).await?;

        let mut copies = Vec::with_capacity(initial_copies.count as usize);

        for _ in 0..initial_copies.count {
            let copy = self
                .copies_repository
                .create_copy(
                    &mut tx,
                    CopyUuid::new(),
                    created.uuid,
                    initial_copies.condition,
                    initial_copies.price,
                )
                .await?;

            copies.push(copy);
        }

        tx.commit().await?;

        Ok(BookWithCopies {
            book: created,
            copies,
        })
    }

    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<Book, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .books_repository
            .update_book(&mut tx, book, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn retire_book(&self, book: BookUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.books_repository.retire_book(&mut tx, book).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn restore_book(&self, book: BookUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.books_repository.restore_book(&mut tx, book).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn add_copies(
        &self,
        book: BookUuid,
        copies: NewCopies,
    ) -> Result<Vec<Copy>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let mut created = Vec::with_capacity(copies.count as usize);

        for _ in 0..copies.count {
            let copy = self
                .copies_repository
                .create_copy(&mut tx, CopyUuid::new(), book, copies.condition, copies.price)
                .await?;

            created.push(copy);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn list_exhausted_copies(&self) -> Result<Vec<Copy>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let copies = self.copies_repository.list_exhausted_copies(&mut tx).await?;

        tx.commit().await?;

        Ok(copies)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Active books with at least one sellable copy, copies included.
    async fn list_catalog(&self) -> Result<Vec<BookWithCopies>, CatalogServiceError>;

    /// One active book with all of its copies.
    async fn get_book(&self, book: BookUuid) -> Result<BookWithCopies, CatalogServiceError>;

    /// Create a book together with its initial batch of copies.
    async fn create_book(
        &self,
        book: NewBook,
        initial_copies: NewCopies,
    ) -> Result<BookWithCopies, CatalogServiceError>;

    /// Patch book fields; copies are unaffected.
    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<Book, CatalogServiceError>;

    /// Soft-delete a book from the catalog.
    async fn retire_book(&self, book: BookUuid) -> Result<(), CatalogServiceError>;

    /// Undo a soft delete.
    async fn restore_book(&self, book: BookUuid) -> Result<(), CatalogServiceError>;

    /// Add a batch of identical copies to a book.
    async fn add_copies(
        &self,
        book: BookUuid,
        copies: NewCopies,
    ) -> Result<Vec<Copy>, CatalogServiceError>;

    /// Copies flagged exhausted, for restocking review.
    async fn list_exhausted_copies(&self) -> Result<Vec<Copy>, CatalogServiceError>;
}
