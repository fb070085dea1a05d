pub mod store;

pub use store::AuditLog;
