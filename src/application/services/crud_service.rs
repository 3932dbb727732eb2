//! Generic create/read/update/delete orchestration for every resource.

use std::sync::Arc;

use crate::domain::repositories::CrudRepository;
use crate::domain::resource::Resource;
use crate::domain::validation::{FieldErrors, RawFields, peek_string, taken_message};
use crate::error::AppError;

/// Validate → persist orchestration for one [`Resource`].
///
/// Stateless apart from its repository handle; the four resource handler sets
/// are this one type instantiated four times.
pub struct CrudService<R: Resource> {
    repository: Arc<dyn CrudRepository<R>>,
}

impl<R: Resource> CrudService<R> {
    /// Creates a new service over the given repository.
    pub fn new(repository: Arc<dyn CrudRepository<R>>) -> Self {
        Self { repository }
    }

    /// Every record, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self) -> Result<Vec<R::Record>, AppError> {
        self.repository.list().await
    }

    /// Fetches one record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    pub async fn get(&self, id: i64) -> Result<R::Record, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(not_found::<R>)
    }

    /// Validates `raw` and persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field rule fails, including a
    /// unique column that is already taken.
    pub async fn create(&self, raw: &RawFields) -> Result<R::Record, AppError> {
        let fields = self.validate(raw, None).await?;
        let record = self.repository.create(fields).await?;

        metrics::counter!("crud_write_total", "resource" => R::TABLE, "operation" => "create")
            .increment(1);
        tracing::debug!(resource = R::TABLE, "Record created");

        Ok(record)
    }

    /// Validates `raw` and overwrites every field of an existing record.
    ///
    /// Required fields missing from `raw` fail validation; there is no
    /// partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    /// Returns [`AppError::Validation`] if a field rule fails.
    pub async fn update(&self, id: i64, raw: &RawFields) -> Result<R::Record, AppError> {
        self.get(id).await?;

        let fields = self.validate(raw, Some(id)).await?;
        let record = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(not_found::<R>)?;

        metrics::counter!("crud_write_total", "resource" => R::TABLE, "operation" => "update")
            .increment(1);
        tracing::debug!(resource = R::TABLE, id, "Record updated");

        Ok(record)
    }

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.get(id).await?;

        if !self.repository.delete(id).await? {
            return Err(not_found::<R>());
        }

        metrics::counter!("crud_write_total", "resource" => R::TABLE, "operation" => "delete")
            .increment(1);
        tracing::debug!(resource = R::TABLE, id, "Record deleted");

        Ok(())
    }

    /// Runs the field rules plus the uniqueness checks, collecting every
    /// violation into one error map.
    ///
    /// `exclude_id` is the record being updated, whose own values never
    /// count as taken.
    async fn validate(
        &self,
        raw: &RawFields,
        exclude_id: Option<i64>,
    ) -> Result<R::Fields, AppError> {
        let mut errors = FieldErrors::new();

        let fields = match R::validate(raw) {
            Ok(fields) => Some(fields),
            Err(violations) => {
                errors.merge(violations);
                None
            }
        };

        for column in R::UNIQUE.iter().copied() {
            if errors.contains(column) {
                continue;
            }
            let Some(value) = peek_string(raw, column) else {
                continue;
            };
            if self
                .repository
                .exists_with(column, &value, exclude_id)
                .await?
            {
                errors.add(column, taken_message(column));
            }
        }

        match fields {
            Some(fields) if errors.is_empty() => Ok(fields),
            _ => Err(AppError::validation(errors)),
        }
    }
}

fn not_found<R: Resource>() -> AppError {
    AppError::not_found(format!("{} not found", R::LABEL))
}
