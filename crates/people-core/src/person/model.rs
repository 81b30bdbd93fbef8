//! Person domain models and wire shapes.

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical person record.
///
/// Every field is populated; records coming from the server pass through
/// [`normalize_person`](super::normalize_person) before they become a `Person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Positive, unique, stable once assigned
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Avatar URL, possibly synthesized from `id`
    pub avatar: String,
}

impl Person {
    /// Returns `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonCreateDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Payload for updating a person. Same shape as [`PersonCreateDto`].
pub type PersonUpdateDto = PersonCreateDto;

impl PersonCreateDto {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Paginated envelope returned by the list endpoint.
///
/// Only `data` is consumed; the pagination metadata defaults to zero when the
/// server leaves it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Acknowledgement returned by the create endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPerson {
    /// Server-side id; not usable as a numeric record id
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

/// Acknowledgement returned by the update endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedPerson {
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
