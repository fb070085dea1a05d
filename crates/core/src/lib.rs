//! Core library for the todo service
//!
//! This crate contains the core business logic, including:
//! - Task documents and their external shape
//! - The task collection interface and a file-backed implementation
//! - The task service with soft-delete semantics

pub mod audit;
pub mod clock;
pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
