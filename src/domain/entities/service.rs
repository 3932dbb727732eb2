//! Service entity: an offering listed by the organization.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::domain::resource::Resource;
use crate::domain::validation::{FieldErrors, RawFields, string_field};

/// A stored service offering.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFields {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Validate)]
struct ServiceInput {
    #[validate(required, length(max = 255))]
    name: Option<String>,
    description: Option<String>,
}

impl Resource for Service {
    type Record = Service;
    type Fields = ServiceFields;

    const LABEL: &'static str = "Service";
    const TABLE: &'static str = "services";
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn validate(raw: &RawFields) -> Result<ServiceFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let input = ServiceInput {
            name: string_field(raw, "name", &mut errors),
            description: string_field(raw, "description", &mut errors),
        };

        if let Err(violations) = input.validate() {
            errors.merge(violations.into());
        }
        errors.into_result()?;

        Ok(ServiceFields {
            name: input.name.unwrap_or_default(),
            description: input.description,
        })
    }

    fn values(fields: &ServiceFields) -> Vec<Option<String>> {
        vec![Some(fields.name.clone()), fields.description.clone()]
    }

    fn assemble(
        id: i64,
        fields: ServiceFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Service {
        Service {
            id,
            name: fields.name,
            description: fields.description,
            created_at,
            updated_at,
        }
    }
}
