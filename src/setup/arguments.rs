use crate::app::{DEFAULT_MAX_CONTENT_LEN, DEFAULT_MAX_TITLE_LEN, NoteLimits, NoteService};
use crate::backends::MemoryBackend;

use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(version, about, long_about)]
pub struct Args {
    /// Address the HTTP server listens on
    #[arg(long, env = "NOTES_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,
    #[arg(long, env = "NOTES_MAX_TITLE_LEN", default_value_t = DEFAULT_MAX_TITLE_LEN)]
    pub max_title_len: usize,
    #[arg(long, env = "NOTES_MAX_CONTENT_LEN", default_value_t = DEFAULT_MAX_CONTENT_LEN)]
    pub max_content_len: usize,
    /// Unlimited when not given
    #[arg(long, env = "NOTES_MAX_NOTE_COUNT")]
    pub max_note_count: Option<usize>,
}

impl Args {
    #[must_use]
    pub const fn limits(&self) -> NoteLimits {
        NoteLimits {
            max_title_len: self.max_title_len,
            max_content_len: self.max_content_len,
            max_note_count: self.max_note_count,
        }
    }
}

/// Parses command-line arguments (falling back to environment variables, which
/// may come from a `.env` file) and builds a `NoteService` over a fresh
/// in-memory backend.
///
/// # Returns
///
/// The parsed `Args` together with the `NoteService` configured from them.
///
/// # Panics
///
/// Like any `clap` parser, exits the process with usage help on invalid arguments.
#[must_use]
pub fn handle_args() -> (Args, NoteService) {
    // A missing .env file is fine
    dotenv::dotenv().ok();
    let args = Args::parse();

    let service = NoteService::new(Box::new(MemoryBackend::new()), args.limits());
    (args, service)
}
