use serde::{Deserialize, Deserializer, Serialize};

/// The backend stores names as nullable columns.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root category of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Second-level category; always scoped to exactly one [`Interest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "interestId", default, deserialize_with = "null_as_empty")]
    pub interest_id: String,
}

/// A note ready to be filed under a resolved interest/area pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub interest: String,
    pub area: String,
    pub tags: Vec<String>,
}

/// A card for the professional planning board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlanningCard {
    pub title: String,
    pub status: String,
    pub priority: String,
}

impl Interest {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Area {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        interest_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interest_id: interest_id.into(),
        }
    }
}
