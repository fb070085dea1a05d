//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use todo_core::task::TaskService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_service: TaskService,
    data_file: PathBuf,
}

impl AppState {
    pub fn new(task_service: TaskService, data_file: PathBuf) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_service,
                data_file,
            }),
        }
    }

    /// Get reference to the task service
    pub fn task_service(&self) -> &TaskService {
        &self.inner.task_service
    }

    pub fn data_file(&self) -> &Path {
        &self.inner.data_file
    }
}
