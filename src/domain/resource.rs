//! The parametrization shared by every CRUD resource.
//!
//! A [`Resource`] bundles one entity's field-rule table and its storage
//! binding. The CRUD service, repositories and HTTP handlers are written once,
//! generically over this trait.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Debug;

use crate::domain::validation::{FieldErrors, RawFields};

/// Static description of a CRUD resource.
///
/// # Storage binding
///
/// `TABLE` and `COLUMNS` describe where the validated field set lives. Every
/// column of every resource is a nullable-or-not text column, so the field set
/// is bound as a list of `Option<String>` in `COLUMNS` order (see
/// [`Resource::values`]).
pub trait Resource: Send + Sync + 'static {
    /// Stored row, including the assigned identifier and timestamps.
    type Record: Serialize + Clone + Debug + Send + Sync + 'static;

    /// Validated field set, used verbatim for persistence.
    type Fields: Clone + Debug + Send + Sync + 'static;

    /// Human-readable name used in response messages ("Membre not found").
    const LABEL: &'static str;

    /// Backing table name.
    const TABLE: &'static str;

    /// Writable columns, in the order returned by [`Resource::values`].
    const COLUMNS: &'static [&'static str];

    /// Columns whose values must be unique across the table.
    const UNIQUE: &'static [&'static str] = &[];

    /// Applies the field-rule table to a raw request body.
    fn validate(raw: &RawFields) -> Result<Self::Fields, FieldErrors>;

    /// Column values of a field set, aligned with [`Resource::COLUMNS`].
    fn values(fields: &Self::Fields) -> Vec<Option<String>>;

    /// Builds a record from its parts.
    fn assemble(
        id: i64,
        fields: Self::Fields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self::Record;

    /// Value of a single column, if the column exists and is set.
    fn column_value(fields: &Self::Fields, column: &str) -> Option<String> {
        let index = Self::COLUMNS.iter().position(|c| *c == column)?;
        Self::values(fields).into_iter().nth(index).flatten()
    }
}
