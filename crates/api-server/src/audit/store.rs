use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use todo_core::audit::AuditSink;

/// Append-only text log of audit notices.
///
/// Notices are queued and written by a single background task, so callers
/// never wait on disk and lines keep the order they were sent in.
pub struct AuditLog {
    sender: mpsc::UnboundedSender<String>,
}

impl AuditLog {
    /// Open the log at `path` and start its writer.
    ///
    /// The writer exits once every `AuditLog` handle is dropped and the queue
    /// is drained; await the returned handle to flush on shutdown.
    pub async fn open(path: PathBuf) -> std::io::Result<(Self, JoinHandle<()>)> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(path, receiver));
        Ok((Self { sender }, writer))
    }
}

impl AuditSink for AuditLog {
    fn notify(&self, message: String) {
        if self.sender.send(message).is_err() {
            warn!("Audit writer stopped; dropping notice");
        }
    }
}

async fn run_writer(path: PathBuf, mut receiver: mpsc::UnboundedReceiver<String>) {
    while let Some(message) = receiver.recv().await {
        if let Err(err) = append_line(&path, &message).await {
            warn!("Failed to write audit log {}: {}", path.display(), err);
        }
    }
}

async fn append_line(path: &Path, message: &str) -> std::io::Result<()> {
    let line = format!(
        "{} - {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
        message
    );

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
