//! Business logic helpers for managing categories.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::book::Book;
use crate::domain::category::Category;
use crate::domain::common::SoftDelete;
use crate::errors::LedgerError;

/// Provides validated CRUD helpers for ledger categories.
pub struct CategoryService;

impl CategoryService {
    /// Adds a new category and returns its identifier.
    pub fn add(book: &mut Book, category: Category) -> ServiceResult<Uuid> {
        Self::validate_name(book, None, &category.name)?;
        Ok(book.add_category(category))
    }

    /// Renames the category. The kind is fixed at creation time so recorded
    /// balances keep their polarity.
    pub fn rename(book: &mut Book, id: Uuid, name: impl Into<String>) -> ServiceResult<()> {
        let name = name.into();
        Self::validate_name(book, Some(id), &name)?;
        let category = book
            .category_mut(id)
            .filter(|category| !category.is_deleted())
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        category.name = name;
        book.touch();
        Ok(())
    }

    /// Moves the category to the recycle bin. Refused while live accounts
    /// still reference it.
    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        let name = book
            .live_category(id)
            .map(|category| category.name.clone())
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        if book
            .live_accounts()
            .any(|account| account.category_id == id)
        {
            return Err(LedgerError::StillReferenced {
                kind: "category",
                name,
            }
            .into());
        }
        if let Some(category) = book.category_mut(id) {
            category.mark_deleted();
        }
        book.touch();
        tracing::info!(category = %id, "category moved to recycle bin");
        Ok(())
    }

    /// Returns the book's live categories.
    pub fn list(book: &Book) -> Vec<&Category> {
        book.live_categories().collect()
    }

    fn validate_name(book: &Book, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid(
                "Category name cannot be empty".into(),
            ));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = book.live_categories().any(|category| {
            let name = category.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
