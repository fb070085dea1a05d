//! API Server for the todo service
//!
//! Serves the task REST API and, unless disabled, appends audit notices
//! for task creation to a log file.

mod audit;
mod config;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_core::task::{FileTaskCollection, TaskService};

use crate::audit::AuditLog;
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "todo_api_server=debug,todo_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let tasks_path = config.tasks_path();
    tracing::info!("Using task data file: {:?}", tasks_path);

    let collection = FileTaskCollection::new(tasks_path.clone())
        .await
        .with_context(|| format!("failed to open task collection at {:?}", tasks_path))?;
    let mut task_service = TaskService::new(Arc::new(collection));

    let audit_writer = match &config.audit_log {
        Some(path) => {
            let (log, writer) = AuditLog::open(path.clone())
                .await
                .with_context(|| format!("failed to open audit log at {:?}", path))?;
            tracing::info!("Writing audit notices to {:?}", path);
            task_service = task_service.with_audit(Arc::new(log));
            Some(writer)
        }
        None => {
            tracing::info!("Audit log disabled");
            None
        }
    };

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::task::router())
        .with_state(AppState::new(task_service, tasks_path))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("REST API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its audit handle are gone; let the writer drain
    if let Some(writer) = audit_writer {
        if let Err(err) = writer.await {
            tracing::warn!("Audit writer ended abnormally: {}", err);
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
