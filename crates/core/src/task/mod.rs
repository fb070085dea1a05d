//! Task module
//!
//! This module contains task documents, the collection interface and the
//! service that implements the task operations.

mod collection;
mod file_store;
mod model;
mod object_id;
mod service;

pub use collection::{TaskCollection, TaskFilter, TaskPatch, UpdateResult};
pub use file_store::FileTaskCollection;
pub use model::*;
pub use object_id::{ObjectId, ObjectIdError};
pub use service::TaskService;
