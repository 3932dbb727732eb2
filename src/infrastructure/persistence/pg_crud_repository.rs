//! PostgreSQL implementation of the generic CRUD repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::repositories::CrudRepository;
use crate::domain::resource::Resource;
use crate::error::{AppError, map_write_error};

/// SQL text for one resource table, rendered once from `R::TABLE` / `R::COLUMNS`.
#[derive(Debug, Clone)]
struct Statements {
    list: String,
    find: String,
    insert: String,
    update: String,
    delete: String,
}

impl Statements {
    fn render(table: &str, columns: &[&str]) -> Self {
        let returning = format!("id, {}, created_at, updated_at", columns.join(", "));

        let placeholders = (1..=columns.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");

        // $1 is the id; column values start at $2.
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            list: format!("SELECT {returning} FROM {table} ORDER BY id"),
            find: format!("SELECT {returning} FROM {table} WHERE id = $1"),
            insert: format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING {returning}",
                columns.join(", ")
            ),
            update: format!(
                "UPDATE {table} SET {assignments}, updated_at = NOW() WHERE id = $1 RETURNING {returning}"
            ),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
        }
    }
}

/// PostgreSQL repository for any [`Resource`].
///
/// Table and column names come from the resource's static binding, never from
/// request input. Unique columns are enforced by table constraints, so two
/// concurrent creates with the same email cannot both succeed.
pub struct PgCrudRepository<R> {
    pool: Arc<PgPool>,
    statements: Statements,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> PgCrudRepository<R> {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            statements: Statements::render(R::TABLE, R::COLUMNS),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R> CrudRepository<R> for PgCrudRepository<R>
where
    R: Resource,
    R::Record: for<'r> FromRow<'r, PgRow> + Unpin,
{
    async fn list(&self) -> Result<Vec<R::Record>, AppError> {
        let rows = sqlx::query_as::<_, R::Record>(&self.statements.list)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<R::Record>, AppError> {
        let row = sqlx::query_as::<_, R::Record>(&self.statements.find)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn create(&self, fields: R::Fields) -> Result<R::Record, AppError> {
        let mut query = sqlx::query_as::<_, R::Record>(&self.statements.insert);
        for value in R::values(&fields) {
            query = query.bind(value);
        }

        query
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_write_error(R::TABLE, e))
    }

    async fn update(&self, id: i64, fields: R::Fields) -> Result<Option<R::Record>, AppError> {
        let mut query = sqlx::query_as::<_, R::Record>(&self.statements.update).bind(id);
        for value in R::values(&fields) {
            query = query.bind(value);
        }

        query
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_write_error(R::TABLE, e))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
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

        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {column} = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
            R::TABLE
        );

        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .bind(exclude_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }
}
