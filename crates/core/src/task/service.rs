//! Task service
//!
//! Request-level operations over a task collection with soft-delete
//! semantics: deleted documents stay in the collection but are invisible to
//! every operation here.

use std::sync::Arc;

use super::collection::{TaskCollection, TaskFilter, TaskPatch};
use super::model::{NewTaskDocument, TaskInput, TaskView};
use super::object_id::ObjectId;
use crate::audit::{self, AuditSink};
use crate::clock::{Clock, SystemClock};
use crate::{Error, Result};

#[derive(Clone)]
pub struct TaskService {
    collection: Arc<dyn TaskCollection>,
    audit: Option<Arc<dyn AuditSink>>,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(collection: Arc<dyn TaskCollection>) -> Self {
        Self {
            collection,
            audit: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Notify `audit` around every create
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Replace the time source used for timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// All tasks that have not been deleted
    pub async fn list_active(&self) -> Result<Vec<TaskView>> {
        let docs = self.collection.find(&TaskFilter::active()).await?;
        Ok(docs.into_iter().map(TaskView::from).collect())
    }

    /// Look up a single active task
    pub async fn get_active(&self, id: &str) -> Result<TaskView> {
        let id = parse_id(id)?;
        self.collection
            .find_one(&TaskFilter::active_by_id(id))
            .await?
            .map(TaskView::from)
            .ok_or_else(|| Error::TaskNotFound(id.to_hex()))
    }

    /// Insert a new active task and return its id
    pub async fn create(&self, input: TaskInput) -> Result<ObjectId> {
        let title = input.title.clone();
        self.notify(audit::creating_notice(&title));

        let doc = NewTaskDocument::from_input(input, self.clock.now());
        let id = self.collection.insert_one(doc).await.inspect_err(|err| {
            tracing::error!("Failed to insert task '{}': {}", title, err);
        })?;

        self.notify(audit::created_notice(&title, &id.to_hex()));
        tracing::info!("Created task {}", id);
        Ok(id)
    }

    /// Overwrite the client-owned fields of an active task
    pub async fn update(&self, id: &str, input: TaskInput) -> Result<ObjectId> {
        let id = parse_id(id)?;
        let patch = TaskPatch {
            title: Some(input.title),
            description: Some(input.description),
            is_completed: Some(input.is_completed),
            updated_at: Some(self.clock.now()),
            ..Default::default()
        };

        let result = self
            .collection
            .update_one(&TaskFilter::active_by_id(id), patch)
            .await?;
        if result.matched_count == 0 {
            return Err(Error::TaskNotFound(id.to_hex()));
        }

        tracing::info!("Updated task {}", id);
        Ok(id)
    }

    /// Mark an active task as deleted. Deleted tasks never come back.
    pub async fn delete(&self, id: &str) -> Result<ObjectId> {
        let id = parse_id(id)?;
        let patch = TaskPatch {
            is_deleted: Some(true),
            ..Default::default()
        };

        let result = self
            .collection
            .update_one(&TaskFilter::active_by_id(id), patch)
            .await?;
        if result.matched_count == 0 {
            return Err(Error::TaskNotFound(id.to_hex()));
        }

        tracing::info!("Deleted task {}", id);
        Ok(id)
    }

    fn notify(&self, message: String) {
        if let Some(audit) = &self.audit {
            audit.notify(message);
        }
    }
}

fn parse_id(raw: &str) -> Result<ObjectId> {
    raw.parse::<ObjectId>()
        .map_err(|err| Error::MalformedId(format!("'{}': {}", raw, err)))
}
