//! File-based task collection
//!
//! Stores task documents as a JSON array in a file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::collection::{TaskCollection, TaskFilter, TaskPatch, UpdateResult};
use super::model::{NewTaskDocument, TaskDocument};
use super::object_id::ObjectId;
use crate::{Error, Result};

/// File-backed task collection using JSON
pub struct FileTaskCollection {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of the documents, in insertion order
    documents: RwLock<Vec<TaskDocument>>,
}

impl FileTaskCollection {
    /// Open a collection
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let documents = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            documents: RwLock::new(documents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next snapshot is written to before it replaces `path`
    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    /// Write the documents to disk
    ///
    /// The file is replaced by a rename, so readers see either the old or
    /// the new snapshot, never a truncated one.
    async fn persist(&self, documents: &[TaskDocument]) -> Result<()> {
        let content = serde_json::to_string_pretty(documents)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let staging = self.staging_path();
        tokio::fs::write(&staging, content).await?;
        if let Err(err) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(err.into());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskCollection for FileTaskCollection {
    async fn find(&self, filter: &TaskFilter) -> Result<Vec<TaskDocument>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &TaskFilter) -> Result<Option<TaskDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| filter.matches(doc)).cloned())
    }

    async fn insert_one(&self, doc: NewTaskDocument) -> Result<ObjectId> {
        let mut documents = self.documents.write().await;
        let id = ObjectId::new();
        if documents.iter().any(|existing| existing.id == id) {
            return Err(Error::Storage(format!("duplicate key: {}", id)));
        }

        documents.push(doc.into_document(id));
        if let Err(err) = self.persist(&documents).await {
            documents.pop();
            tracing::warn!("Failed to persist inserted task {}: {}", id, err);
            return Err(err);
        }

        tracing::debug!("Inserted task {}", id);
        Ok(id)
    }

    async fn update_one(&self, filter: &TaskFilter, patch: TaskPatch) -> Result<UpdateResult> {
        let mut documents = self.documents.write().await;
        let Some(index) = documents.iter().position(|doc| filter.matches(doc)) else {
            return Ok(UpdateResult::default());
        };

        let previous = documents[index].clone();
        if !patch.apply(&mut documents[index]) {
            return Ok(UpdateResult {
                matched_count: 1,
                modified_count: 0,
            });
        }

        if let Err(err) = self.persist(&documents).await {
            documents[index] = previous;
            tracing::warn!("Failed to persist update of task {}: {}", documents[index].id, err);
            return Err(err);
        }

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: 1,
        })
    }
}
