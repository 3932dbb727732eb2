//! In-process implementation of the generic CRUD repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::repositories::CrudRepository;
use crate::domain::resource::Resource;
use crate::domain::validation::{FieldErrors, taken_message};
use crate::error::AppError;

#[derive(Debug, Clone)]
struct Row<F> {
    fields: F,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Table<F> {
    next_id: i64,
    rows: BTreeMap<i64, Row<F>>,
}

/// In-memory store for any [`Resource`].
///
/// Rows live in a `BTreeMap` keyed by id, so listing is naturally ordered.
/// Unique columns are re-checked while holding the write lock, which makes
/// create and update atomic with respect to each other.
pub struct MemoryCrudRepository<R: Resource> {
    table: RwLock<Table<R::Fields>>,
}

impl<R: Resource> MemoryCrudRepository<R> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<R: Resource> Default for MemoryCrudRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn record<R: Resource>(id: i64, row: &Row<R::Fields>) -> R::Record {
    R::assemble(id, row.fields.clone(), row.created_at, row.updated_at)
}

/// First unique column of `fields` already held by another row.
fn conflicting_column<R: Resource>(
    rows: &BTreeMap<i64, Row<R::Fields>>,
    fields: &R::Fields,
    exclude_id: Option<i64>,
) -> Option<&'static str> {
    R::UNIQUE.iter().copied().find(|column| {
        let Some(value) = R::column_value(fields, column) else {
            return false;
        };
        rows.iter().any(|(id, row)| {
            Some(*id) != exclude_id
                && R::column_value(&row.fields, column).as_deref() == Some(value.as_str())
        })
    })
}

fn taken(column: &str) -> AppError {
    AppError::validation(FieldErrors::single(column, taken_message(column)))
}

#[async_trait]
impl<R: Resource> CrudRepository<R> for MemoryCrudRepository<R> {
    async fn list(&self) -> Result<Vec<R::Record>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, row)| record::<R>(*id, row))
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<R::Record>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).map(|row| record::<R>(id, row)))
    }

    async fn create(&self, fields: R::Fields) -> Result<R::Record, AppError> {
        let mut table = self.table.write().await;

        if let Some(column) = conflicting_column::<R>(&table.rows, &fields, None) {
            return Err(taken(column));
        }

        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let row = Row {
            fields,
            created_at: now,
            updated_at: now,
        };
        let created = record::<R>(id, &row);
        table.rows.insert(id, row);

        Ok(created)
    }

    async fn update(&self, id: i64, fields: R::Fields) -> Result<Option<R::Record>, AppError> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&id) {
            return Ok(None);
        }

        if let Some(column) = conflicting_column::<R>(&table.rows, &fields, Some(id)) {
            return Err(taken(column));
        }

        Ok(table.rows.get_mut(&id).map(|row| {
            row.fields = fields;
            row.updated_at = Utc::now();
            record::<R>(id, row)
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn exists_with(
        &self,
        column: &'static str,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        if !R::COLUMNS.contains(&column) {
            return Err(AppError::internal(
                "Unknown column in uniqueness check",
                json!({"table": R::TABLE, "column": column}),
            ));
        }

        let table = self.table.read().await;
        Ok(table.rows.iter().any(|(id, row)| {
            Some(*id) != exclude_id && R::column_value(&row.fields, column).as_deref() == Some(value)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Country, CountryFields, Member, MemberFields};
    use std::sync::Arc;

    fn member(name: &str, email: &str) -> MemberFields {
        MemberFields {
            name: name.to_string(),
            email: email.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MemoryCrudRepository::<Country>::new();

        let first = repo
            .create(CountryFields {
                name: "France".to_string(),
                image: None,
            })
            .await
            .unwrap();
        let second = repo
            .create(CountryFields {
                name: "Benin".to_string(),
                image: Some("bj.png".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "France");
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = MemoryCrudRepository::<Member>::new();

        let first = repo.create(member("A", "a@example.com")).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let second = repo.create(member("B", "b@example.com")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_unique_column() {
        let repo = MemoryCrudRepository::<Member>::new();

        repo.create(member("A", "same@example.com")).await.unwrap();
        let result = repo.create(member("B", "same@example.com")).await;

        match result {
            Err(AppError::Validation { errors }) => assert!(errors.contains("email")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_only_one_succeeds() {
        let repo = Arc::new(MemoryCrudRepository::<Member>::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(member(&format!("M{i}"), "race@example.com"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_can_keep_own_unique_value() {
        let repo = MemoryCrudRepository::<Member>::new();

        let created = repo.create(member("A", "a@example.com")).await.unwrap();
        let updated = repo
            .update(created.id, member("A renamed", "a@example.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "A renamed");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = MemoryCrudRepository::<Member>::new();

        let result = repo.update(42, member("A", "a@example.com")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_exists_with_excludes_own_id() {
        let repo = MemoryCrudRepository::<Member>::new();
        let created = repo.create(member("A", "a@example.com")).await.unwrap();

        assert!(repo.exists_with("email", "a@example.com", None).await.unwrap());
        assert!(
            !repo
                .exists_with("email", "a@example.com", Some(created.id))
                .await
                .unwrap()
        );
        assert!(repo.exists_with("nope", "x", None).await.is_err());
    }
}
