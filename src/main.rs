use anyhow::Context;
use log::info;
use notes_api::http;
use notes_api::setup::{arguments, logging};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (args, service) = arguments::handle_args();
    logging::setup_log();

    let limits = service.limits();
    info!(
        "Limits: title {} chars, content {} chars, note count {}",
        limits.max_title_len,
        limits.max_content_len,
        limits
            .max_note_count
            .map_or_else(|| "unlimited".to_string(), |max| max.to_string())
    );

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    http::serve(listener, Arc::new(service))
        .await
        .context("Server error")
}
