//! HTTP transport over [`NoteService`].
//!
//! Only routing, JSON and the `Authorization` presence check live here; every
//! business rule is the service's job.

pub mod routes;

use crate::app::NoteService;
use axum::Router;
use axum::routing::{get, post};
use log::{info, warn};
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const API_PREFIX: &str = "/api/v1";

/// Builds the `/api/v1/notes` router around a shared service
pub fn router(service: Arc<NoteService>) -> Router {
    let notes = Router::new()
        .route("/notes", post(routes::create_note).get(routes::list_notes))
        .route(
            "/notes/:id",
            get(routes::get_note)
                .patch(routes::update_note)
                .delete(routes::delete_note),
        )
        .with_state(service);

    Router::new().nest(API_PREFIX, notes)
}

/// Serves the API on `listener` until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections
pub async fn serve(listener: TcpListener, service: Arc<NoteService>) -> io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Notes API listening on http://{addr}{API_PREFIX}/notes");
    }

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested, finishing in-flight requests"),
        Err(e) => {
            // Without a signal handler the server just runs until killed
            warn!("Failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}
