//! Task model definitions

use serde::{Deserialize, Serialize};

use super::object_id::ObjectId;
use crate::{Error, Result};

/// Client-supplied task fields.
///
/// Server-owned fields (`id`, `is_deleted`, timestamps) are not part of this
/// type, so any that arrive in a request body are dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl TaskInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            is_completed: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the completion flag
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Reject payloads without a usable title
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("Title cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// A document as persisted in the task collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A document awaiting insertion; the collection assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskDocument {
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NewTaskDocument {
    /// Build an active document stamped with `now`
    pub fn from_input(input: TaskInput, now: i64) -> Self {
        Self {
            title: input.title,
            description: input.description,
            is_completed: input.is_completed,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_document(self, id: ObjectId) -> TaskDocument {
        TaskDocument {
            id,
            title: self.title,
            description: self.description,
            is_completed: self.is_completed,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// External representation of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<TaskDocument> for TaskView {
    fn from(doc: TaskDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            is_completed: doc.is_completed,
            is_deleted: doc.is_deleted,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_ignores_server_owned_fields() {
        let input: TaskInput = serde_json::from_str(
            r#"{
                "title": "Buy milk",
                "id": "000000000000000000000000",
                "is_deleted": true,
                "created_at": 1,
                "updated_at": 2
            }"#,
        )
        .unwrap();

        assert_eq!(input, TaskInput::new("Buy milk"));
    }

    #[test]
    fn test_input_requires_title() {
        assert!(serde_json::from_str::<TaskInput>(r#"{"description": "x"}"#).is_err());
        assert!(TaskInput::new("   ").validate().is_err());
        assert!(TaskInput::new("ok").validate().is_ok());
    }

    #[test]
    fn test_new_document_is_active() {
        let doc = NewTaskDocument::from_input(
            TaskInput::new("Write report").with_description("quarterly"),
            1_700_000_000,
        );
        assert!(!doc.is_deleted);
        assert!(!doc.is_completed);
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.description.as_deref(), Some("quarterly"));
    }

    #[test]
    fn test_view_renders_id_as_hex() {
        let id = ObjectId::from_bytes([1; 12]);
        let doc = NewTaskDocument::from_input(TaskInput::new("t"), 10).into_document(id);
        let view = TaskView::from(doc.clone());

        assert_eq!(view.id, "010101010101010101010101");
        assert_eq!(view.title, doc.title);

        let stored = serde_json::to_value(&doc).unwrap();
        assert_eq!(stored["_id"], "010101010101010101010101");
        assert_eq!(stored["is_deleted"], false);
    }
}
