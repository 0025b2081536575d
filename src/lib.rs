#![deny(clippy::cargo)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::nursery)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![deny(clippy::pedantic)]

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub mod app;
pub mod backends;
pub mod http;
pub mod setup;

// More convenient Result type
pub type Result<T> = std::result::Result<T, NoteError>;

/// Identifier assigned by the backend. Always > 0 and never reused
pub type NoteId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Fields supplied by the caller when creating a note. Id and timestamps belong to the backend
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Trait to be implemented by all backends that manage storing and retrieving notes.
///
/// Backends are shared between request workers, so every method takes `&self`
/// and the implementation serializes access to its own state.
pub trait NoteBackend: Send + Sync {
    /// Stores a new note and returns the ID assigned to it
    ///
    /// # Errors
    ///
    /// Returns an error if the note could not be inserted
    fn create(&self, note: NewNote) -> Result<NoteId>;

    /// Fetches a copy of a note by ID
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if the note does not exist
    fn read(&self, id: NoteId) -> Result<Note>;

    /// Overwrites title and/or content of an existing note. Empty values leave
    /// the field untouched. The update timestamp is always refreshed
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if the note does not exist
    fn update(&self, id: NoteId, title: &str, content: &str) -> Result<()>;

    /// Deletes a note by ID from the backend
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if the note does not exist
    fn delete(&self, id: NoteId) -> Result<()>;

    /// Returns copies of all notes in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be read
    fn list(&self) -> Result<Vec<Note>>;

    /// Number of notes currently stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be read
    fn count(&self) -> Result<usize>;
}

// Everything the service can hand back to its caller
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note not found")]
    NotFound(NoteId),

    #[error(transparent)]
    Validation(#[from] NoteValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

// Enum for all possible input validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteValidationError {
    #[error("title cannot be empty")]
    TitleEmpty,

    #[error("title too long. Max: {max}, Got: {got}")]
    TitleTooLong { max: usize, got: usize },

    #[error("content too long. Max: {max}, Got: {got}")]
    ContentTooLong { max: usize, got: usize },

    #[error("note count limit reached. Max: {max}")]
    NoteCountLimit { max: usize },
}

// Enum for all possible backend errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("No notes with ID: {0}")]
    NoteNotFound(NoteId),
}
