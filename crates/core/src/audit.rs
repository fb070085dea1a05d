//! Audit notifications emitted around task creation

/// Receiver of audit notices.
///
/// `notify` must return immediately; implementations hand the message off to
/// their own worker and never report failures back to the caller.
pub trait AuditSink: Send + Sync {
    fn notify(&self, message: String);
}

pub fn creating_notice(title: &str) -> String {
    format!(
        "a todo with {} as title is going to be added",
        title.to_uppercase()
    )
}

pub fn created_notice(title: &str, id: &str) -> String {
    format!(
        "a todo with {} as title inserted - id in db: {}",
        title.to_uppercase(),
        id
    )
}
