use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Stored todo record, serialized with camelCase keys
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

// Missing = key absent, Present(null) = explicit null
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field {
    #[default]
    Missing,
    Present(Value),
}

impl Field {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Field::Missing => None,
            Field::Present(value) => Some(value),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Field::Present(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(Value::as_bool)
    }

    fn take(fields: &mut Map<String, Value>, key: &str) -> Field {
        fields.remove(key).map(Field::Present).unwrap_or_default()
    }
}

// Only a JSON object carries fields; any other body leaves every field Missing.
// Repeated keys keep the last value.
fn object_fields<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(fields) => Ok(fields),
        _ => Ok(Map::new()),
    }
}

// POST /api/todos body, checked by validation::validate_create
#[derive(Debug, Default)]
pub struct CreateTodoPayload {
    pub title: Field,
    pub description: Field,
}

impl<'de> Deserialize<'de> for CreateTodoPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = object_fields(deserializer)?;
        Ok(Self {
            title: Field::take(&mut fields, "title"),
            description: Field::take(&mut fields, "description"),
        })
    }
}

// PUT /api/todos/:id body, checked by validation::validate_update
#[derive(Debug, Default)]
pub struct UpdateTodoPayload {
    pub title: Field,
    pub description: Field,
    pub completed: Field,
}

impl<'de> Deserialize<'de> for UpdateTodoPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = object_fields(deserializer)?;
        Ok(Self {
            title: Field::take(&mut fields, "title"),
            description: Field::take(&mut fields, "description"),
            completed: Field::take(&mut fields, "completed"),
        })
    }
}

// Validated input for TodoStore::create
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

// Validated partial update, None fields stay untouched
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}
