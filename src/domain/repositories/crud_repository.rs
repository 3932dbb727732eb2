//! Repository trait shared by every CRUD resource.

use crate::domain::resource::Resource;
use crate::error::AppError;
use async_trait::async_trait;

/// Single-table storage for one [`Resource`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCrudRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryCrudRepository`] - in-process store
///
/// # Uniqueness
///
/// [`CrudRepository::exists_with`] backs the validation pre-check. Implementations
/// must still enforce `R::UNIQUE` atomically on `create` and `update`, reporting a
/// violation as [`AppError::Validation`] on the offending field.
#[async_trait]
pub trait CrudRepository<R: Resource>: Send + Sync {
    /// Returns every record, ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<R::Record>, AppError>;

    /// Finds a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<R::Record>, AppError>;

    /// Inserts a new record; the id is assigned by storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a unique column is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, fields: R::Fields) -> Result<R::Record, AppError>;

    /// Overwrites every writable column of an existing record.
    ///
    /// Returns `Ok(None)` if no record has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a unique column is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, fields: R::Fields) -> Result<Option<R::Record>, AppError>;

    /// Removes a record. Returns `false` if no record had this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Whether another record already holds `value` in `column`.
    ///
    /// `exclude_id` skips the record being updated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `column` is not a column of this
    /// resource, or on storage errors.
    async fn exists_with(
        &self,
        column: &'static str,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;
}
