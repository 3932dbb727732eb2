//! Project entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::domain::resource::Resource;
use crate::domain::validation::{FieldErrors, RawFields, string_field};

/// A stored project.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Validate)]
struct ProjectInput {
    #[validate(required, length(max = 255))]
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
}

impl Resource for Project {
    type Record = Project;
    type Fields = ProjectFields;

    const LABEL: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] = &["title", "description", "image"];

    fn validate(raw: &RawFields) -> Result<ProjectFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let input = ProjectInput {
            title: string_field(raw, "title", &mut errors),
            description: string_field(raw, "description", &mut errors),
            image: string_field(raw, "image", &mut errors),
        };

        if let Err(violations) = input.validate() {
            errors.merge(violations.into());
        }
        errors.into_result()?;

        Ok(ProjectFields {
            title: input.title.unwrap_or_default(),
            description: input.description,
            image: input.image,
        })
    }

    fn values(fields: &ProjectFields) -> Vec<Option<String>> {
        vec![
            Some(fields.title.clone()),
            fields.description.clone(),
            fields.image.clone(),
        ]
    }

    fn assemble(
        id: i64,
        fields: ProjectFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Project {
        Project {
            id,
            title: fields.title,
            description: fields.description,
            image: fields.image,
            created_at,
            updated_at,
        }
    }
}
