// rest/mod.rs — HTTP server for the task API.
//
// Axum HTTP server, local only by default.
//
// Endpoints:
//   GET    /tasks                    (?completed=true|false)
//   GET    /tasks/priority/{level}   (level: low | medium | high)
//   GET    /tasks/{id}
//   POST   /tasks
//   PUT    /tasks/{id}
//   DELETE /tasks/{id}
//   GET    /health

pub mod error;
pub mod routes;

use anyhow::{Context as _, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;

    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("task API listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health (no body contract beyond status)
        .route("/health", get(routes::health::health))
        // Tasks
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        // Static segment wins over the `{id}` capture below.
        .route(
            "/tasks/priority/{level}",
            get(routes::tasks::tasks_by_priority),
        )
        .route(
            "/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
