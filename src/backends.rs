pub mod memory;

pub use memory::MemoryBackend;

pub use crate::{BackendError, NewNote, Note, NoteBackend, NoteError, NoteId, Result};
