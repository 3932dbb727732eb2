//! Member entity: a person listed by the organization.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::domain::resource::Resource;
use crate::domain::validation::{FieldErrors, RawFields, string_field};

/// A stored member.
///
/// `email` is unique across all members.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated member field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFields {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

#[derive(Debug, Validate)]
struct MemberInput {
    #[validate(required, length(max = 255))]
    name: Option<String>,
    #[validate(required, email)]
    email: Option<String>,
    image: Option<String>,
}

impl Resource for Member {
    type Record = Member;
    type Fields = MemberFields;

    const LABEL: &'static str = "Membre";
    const TABLE: &'static str = "members";
    const COLUMNS: &'static [&'static str] = &["name", "email", "image"];
    const UNIQUE: &'static [&'static str] = &["email"];

    fn validate(raw: &RawFields) -> Result<MemberFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let input = MemberInput {
            name: string_field(raw, "name", &mut errors),
            email: string_field(raw, "email", &mut errors),
            image: string_field(raw, "image", &mut errors),
        };

        if let Err(violations) = input.validate() {
            errors.merge(violations.into());
        }
        errors.into_result()?;

        Ok(MemberFields {
            name: input.name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            image: input.image,
        })
    }

    fn values(fields: &MemberFields) -> Vec<Option<String>> {
        vec![
            Some(fields.name.clone()),
            Some(fields.email.clone()),
            fields.image.clone(),
        ]
    }

    fn assemble(
        id: i64,
        fields: MemberFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Member {
        Member {
            id,
            name: fields.name,
            email: fields.email,
            image: fields.image,
            created_at,
            updated_at,
        }
    }
}
