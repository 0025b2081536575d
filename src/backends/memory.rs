use super::{BackendError, NewNote, Note, NoteBackend, NoteError, NoteId, Result};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;

// Ids only grow, so a BTreeMap iterates in insertion order
#[derive(Debug, Default)]
struct Store {
    notes: BTreeMap<NoteId, Note>,
    last_id: NoteId,
}

/// Process-local backend. Everything is lost on restart.
///
/// The map and the id counter sit behind a single mutex, so exactly one
/// operation touches the store at a time. Reads hand out clones.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: NoteId) -> NoteError {
    NoteError::Backend(BackendError::NoteNotFound(id))
}

impl NoteBackend for MemoryBackend {
    fn create(&self, note: NewNote) -> Result<NoteId> {
        let mut store = self.store.lock();
        store.last_id += 1;
        let id = store.last_id;
        store.notes.insert(
            id,
            Note {
                id,
                title: note.title,
                content: note.content,
                created_at: Utc::now(),
                updated_at: None,
            },
        );
        Ok(id)
    }

    fn read(&self, id: NoteId) -> Result<Note> {
        self.store
            .lock()
            .notes
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    // updated_at is refreshed even when both overrides are empty
    fn update(&self, id: NoteId, title: &str, content: &str) -> Result<()> {
        let mut store = self.store.lock();
        let note = store.notes.get_mut(&id).ok_or_else(|| not_found(id))?;

        if !title.is_empty() {
            note.title = title.to_string();
        }
        if !content.is_empty() {
            note.content = content.to_string();
        }
        note.updated_at = Some(Utc::now());
        Ok(())
    }

    fn delete(&self, id: NoteId) -> Result<()> {
        self.store
            .lock()
            .notes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    fn list(&self) -> Result<Vec<Note>> {
        Ok(self.store.lock().notes.values().cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.store.lock().notes.len())
    }
}
