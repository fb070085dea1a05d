//! Task collection trait
//!
//! Defines the document-store operations the task service relies on.

use async_trait::async_trait;

use super::model::{NewTaskDocument, TaskDocument};
use super::object_id::ObjectId;
use crate::Result;

/// Conjunction of equality predicates over a task document.
/// `None` fields match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub id: Option<ObjectId>,
    pub is_deleted: Option<bool>,
}

impl TaskFilter {
    /// Every document that has not been soft-deleted
    pub fn active() -> Self {
        Self {
            id: None,
            is_deleted: Some(false),
        }
    }

    /// The document with `id`, provided it has not been soft-deleted
    pub fn active_by_id(id: ObjectId) -> Self {
        Self {
            id: Some(id),
            is_deleted: Some(false),
        }
    }

    pub fn matches(&self, doc: &TaskDocument) -> bool {
        self.id.map_or(true, |id| doc.id == id)
            && self.is_deleted
                .map_or(true, |deleted| doc.is_deleted == deleted)
    }
}

/// Field assignments applied by `update_one`. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub is_completed: Option<bool>,
    pub is_deleted: Option<bool>,
    pub updated_at: Option<i64>,
}

impl TaskPatch {
    /// Apply the patch, returning whether any field changed
    pub fn apply(&self, doc: &mut TaskDocument) -> bool {
        let before = doc.clone();
        if let Some(title) = &self.title {
            doc.title = title.clone();
        }
        if let Some(description) = &self.description {
            doc.description = description.clone();
        }
        if let Some(is_completed) = self.is_completed {
            doc.is_completed = is_completed;
        }
        if let Some(is_deleted) = self.is_deleted {
            doc.is_deleted = is_deleted;
        }
        if let Some(updated_at) = self.updated_at {
            // A clock that stepped backwards must not predate creation
            doc.updated_at = updated_at.max(doc.created_at);
        }
        *doc != before
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Document collection holding task records
#[async_trait]
pub trait TaskCollection: Send + Sync {
    /// All documents matching the filter, in insertion order
    async fn find(&self, filter: &TaskFilter) -> Result<Vec<TaskDocument>>;

    /// First document matching the filter
    async fn find_one(&self, filter: &TaskFilter) -> Result<Option<TaskDocument>>;

    /// Insert a document and return the id assigned to it
    async fn insert_one(&self, doc: NewTaskDocument) -> Result<ObjectId>;

    /// Apply `patch` to the first document matching `filter`.
    ///
    /// Matching and writing happen atomically with respect to other calls on
    /// the same collection.
    async fn update_one(&self, filter: &TaskFilter, patch: TaskPatch) -> Result<UpdateResult>;
}
