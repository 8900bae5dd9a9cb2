//! In-memory registry of the user's books.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::book::Book;
use crate::domain::common::SoftDelete;

/// Owns every book and handles book-level bookkeeping. Loading and saving
/// the registry is the persistence collaborator's job.
#[derive(Debug, Default)]
pub struct BookManager {
    books: Vec<Book>,
}

impl BookManager {
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Creates a new book and returns its identifier.
    pub fn add_book(&mut self, name: impl Into<String>) -> ServiceResult<Uuid> {
        let name = name.into();
        self.validate_name(None, &name)?;
        let book = Book::new(name);
        let id = book.id;
        self.books.push(book);
        tracing::info!(book = %id, "created book");
        Ok(id)
    }

    /// Renames the book identified by `id`.
    pub fn rename_book(&mut self, id: Uuid, name: impl Into<String>) -> ServiceResult<()> {
        let name = name.into();
        self.validate_name(Some(id), &name)?;
        let book = self
            .live_book_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Book not found".into()))?;
        book.name = name;
        book.touch();
        Ok(())
    }

    /// Moves the book and everything it owns to the recycle bin.
    pub fn delete_book(&mut self, id: Uuid) -> ServiceResult<()> {
        let book = self
            .live_book_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Book not found".into()))?;
        book.mark_deleted();
        tracing::info!(book = %id, "book moved to recycle bin");
        Ok(())
    }

    pub fn book(&self, id: Uuid) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn book_mut(&mut self, id: Uuid) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    pub fn live_book(&self, id: Uuid) -> Option<&Book> {
        self.book(id).filter(|book| !book.is_deleted())
    }

    pub fn live_book_mut(&mut self, id: Uuid) -> Option<&mut Book> {
        self.book_mut(id).filter(|book| !book.is_deleted())
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn live_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|book| !book.is_deleted())
    }

    pub(crate) fn remove_book(&mut self, id: Uuid) -> Option<Book> {
        let index = self.books.iter().position(|book| book.id == id)?;
        Some(self.books.remove(index))
    }

    fn validate_name(&self, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid("Book name cannot be empty".into()));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = self.live_books().any(|book| {
            let name = book.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| book.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Book `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_rename_book() {
        let mut manager = BookManager::new();
        let id = manager.add_book("Personal").expect("book created");
        manager
            .rename_book(id, "Personal 2026")
            .expect("rename succeeds");
        assert_eq!(manager.book(id).expect("book exists").name, "Personal 2026");
    }

    #[test]
    fn duplicate_book_name_is_rejected() {
        let mut manager = BookManager::new();
        manager.add_book("Personal").expect("book created");
        let err = manager
            .add_book(" personal ")
            .expect_err("duplicate name must be rejected");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn empty_book_name_is_rejected() {
        let mut manager = BookManager::new();
        let err = manager
            .add_book("   ")
            .expect_err("blank name must be rejected");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }
}
