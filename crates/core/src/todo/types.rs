use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::storage::StoreError;

use super::dates::parse_due_date;

/// A single task record with scheduling and completion metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, immutable once assigned.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form priority label, e.g. "High" / "Medium" / "Low".
    #[serde(default)]
    pub priority: String,
    /// Serialized as ISO `YYYY-MM-DD` on the wire.
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Creates a todo with a generated id and empty optional fields.
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            priority: String::new(),
            due_date,
            completed: false,
        }
    }

    /// Sets a specific id for this todo (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the priority label for this todo.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }
}

/// Request payload for creating a new todo.
///
/// The id is optional (generated when absent) and accepts either a
/// JSON string or number, coerced to string. The due date is a free
/// format string normalized by [`parse_due_date`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    pub due_date: String,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl NewTodo {
    /// Validates the payload and converts it into a [`Todo`].
    ///
    /// Assigns a UUIDv4 id when none was supplied, normalizes the due
    /// date, and defaults `completed` to `false` and the optional
    /// string fields to empty.
    pub fn into_todo(self) -> Result<Todo, StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title must not be empty".to_string()));
        }

        let due_date = parse_due_date(&self.due_date)
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        Ok(Todo {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title,
            description: self.description.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            due_date,
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// Request payload for partially updating a todo.
///
/// Only fields present in the payload overwrite the stored value; all
/// others retain their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Applies the present fields to an existing todo in place.
    pub fn apply_to(&self, todo: &mut Todo) -> Result<(), StoreError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(StoreError::Validation("title must not be empty".to_string()));
            }
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(priority) = &self.priority {
            todo.priority = priority.clone();
        }
        if let Some(due_date) = &self.due_date {
            todo.due_date = parse_due_date(due_date)
                .map_err(|e| StoreError::Validation(e.to_string()))?;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        Ok(())
    }
}

/// Deserialize an optional id, coercing JSON numbers to strings.
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(i64),
    }

    let id: Option<IdRepr> = Option::deserialize(deserializer)?;
    Ok(id.map(|id| match id {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    }))
}
