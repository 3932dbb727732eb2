//! Country entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use crate::domain::resource::Resource;
use crate::domain::validation::{FieldErrors, RawFields, string_field};

/// A stored country.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFields {
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Validate)]
struct CountryInput {
    #[validate(required, length(max = 255))]
    name: Option<String>,
    image: Option<String>,
}

impl Resource for Country {
    type Record = Country;
    type Fields = CountryFields;

    const LABEL: &'static str = "Pay";
    const TABLE: &'static str = "countries";
    const COLUMNS: &'static [&'static str] = &["name", "image"];

    fn validate(raw: &RawFields) -> Result<CountryFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let input = CountryInput {
            name: string_field(raw, "name", &mut errors),
            image: string_field(raw, "image", &mut errors),
        };

        if let Err(violations) = input.validate() {
            errors.merge(violations.into());
        }
        errors.into_result()?;

        Ok(CountryFields {
            name: input.name.unwrap_or_default(),
            image: input.image,
        })
    }

    fn values(fields: &CountryFields) -> Vec<Option<String>> {
        vec![Some(fields.name.clone()), fields.image.clone()]
    }

    fn assemble(
        id: i64,
        fields: CountryFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Country {
        Country {
            id,
            name: fields.name,
            image: fields.image,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_name_only() {
        let raw = json!({"name": "France"}).as_object().cloned().unwrap();

        let fields = Country::validate(&raw).unwrap();

        assert_eq!(fields.name, "France");
        assert!(fields.image.is_none());
    }

    #[test]
    fn test_validate_image_must_be_string() {
        let raw = json!({"name": "France", "image": ["a.png"]})
            .as_object()
            .cloned()
            .unwrap();

        let errors = Country::validate(&raw).unwrap_err();

        assert_eq!(
            errors.get("image"),
            Some(&["The image field must be a string.".to_string()][..])
        );
    }
}
