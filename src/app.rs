use crate::{
    BackendError, NewNote, Note, NoteBackend, NoteError, NoteId, NoteValidationError, Result,
};
use log::trace;

pub const DEFAULT_MAX_TITLE_LEN: usize = 100;
pub const DEFAULT_MAX_CONTENT_LEN: usize = 5000;

/// Business rule limits enforced before anything reaches the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteLimits {
    pub max_title_len: usize,
    pub max_content_len: usize,
    /// `None` means no cap on the number of stored notes
    pub max_note_count: Option<usize>,
}

impl Default for NoteLimits {
    fn default() -> Self {
        Self {
            max_title_len: DEFAULT_MAX_TITLE_LEN,
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
            max_note_count: None,
        }
    }
}

pub struct NoteService {
    repo: Box<dyn NoteBackend>,
    limits: NoteLimits,
}

impl NoteService {
    pub fn new(repo: Box<dyn NoteBackend>, limits: NoteLimits) -> Self {
        Self { repo, limits }
    }

    #[must_use]
    pub const fn limits(&self) -> NoteLimits {
        self.limits
    }

    // Validate, store, then read back the populated note
    pub fn create_note(&self, title: String, content: String) -> Result<Note> {
        if title.is_empty() {
            return Err(NoteValidationError::TitleEmpty.into());
        }
        Self::validate_title(&title, self.limits.max_title_len)?;
        Self::validate_content(&content, self.limits.max_content_len)?;

        if let Some(max) = self.limits.max_note_count {
            if self.repo.count()? >= max {
                return Err(NoteValidationError::NoteCountLimit { max }.into());
            }
        }

        let id = self.repo.create(NewNote { title, content })?;
        trace!("Created note with ID: {id}");
        found(self.repo.read(id))
    }

    // Retrieve all notes, oldest first
    pub fn get_all_notes(&self) -> Result<Vec<Note>> {
        self.repo.list()
    }

    pub fn get_note_by_id(&self, id: NoteId) -> Result<Note> {
        found(self.repo.read(id))
    }

    // Partial update: empty title or content keeps the stored value.
    // A missing note is reported before any validation error
    pub fn update_note(&self, id: NoteId, title: &str, content: &str) -> Result<Note> {
        found(self.repo.read(id))?;

        if !title.is_empty() {
            Self::validate_title(title, self.limits.max_title_len)?;
        }
        if !content.is_empty() {
            Self::validate_content(content, self.limits.max_content_len)?;
        }

        found(self.repo.update(id, title, content))?;
        trace!("Updated note with ID: {id}");
        found(self.repo.read(id))
    }

    pub fn delete_note(&self, id: NoteId) -> Result<()> {
        found(self.repo.delete(id))?;
        trace!("Deleted note with ID: {id}");
        Ok(())
    }

    // --- small helpers ---

    /// Checks the title length, counted in characters.
    ///
    /// # Errors
    ///
    /// Returns `NoteValidationError::TitleTooLong` when over `max`
    pub fn validate_title(title: &str, max: usize) -> Result<()> {
        let got = title.chars().count();
        if got > max {
            Err(NoteValidationError::TitleTooLong { max, got }.into())
        } else {
            Ok(())
        }
    }

    /// Checks the content length, counted in characters.
    ///
    /// # Errors
    ///
    /// Returns `NoteValidationError::ContentTooLong` when over `max`
    pub fn validate_content(content: &str, max: usize) -> Result<()> {
        let got = content.chars().count();
        if got > max {
            Err(NoteValidationError::ContentTooLong { max, got }.into())
        } else {
            Ok(())
        }
    }
}

// Lift the backend's missing-note error into the domain-level one
fn found<T>(result: Result<T>) -> Result<T> {
    result.map_err(|e| match e {
        NoteError::Backend(BackendError::NoteNotFound(id)) => NoteError::NotFound(id),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;

    fn service() -> NoteService {
        NoteService::new(Box::new(MemoryBackend::new()), NoteLimits::default())
    }

    fn validation(result: Result<Note>) -> NoteValidationError {
        match result {
            Err(NoteError::Validation(e)) => e,
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_round_trip() {
        let svc = service();
        let note = svc
            .create_note("Meeting notes".to_string(), "Discuss budget".to_string())
            .unwrap();
        assert_eq!(note.title, "Meeting notes");
        assert_eq!(note.content, "Discuss budget");
        assert!(note.id >= 1);
        assert!(note.updated_at.is_none());

        assert_eq!(svc.get_note_by_id(note.id).unwrap(), note);
    }

    #[test]
    fn test_create_ids_strictly_increase() {
        let svc = service();
        let mut last = 0;
        for i in 0..20 {
            let note = svc.create_note(format!("note {i}"), String::new()).unwrap();
            assert!(note.id > last);
            last = note.id;
        }
    }

    #[test]
    fn test_create_empty_title_does_not_store() {
        let svc = service();
        let err = validation(svc.create_note(String::new(), "body".to_string()));
        assert_eq!(err, NoteValidationError::TitleEmpty);
        assert!(svc.get_all_notes().unwrap().is_empty());
    }

    #[test]
    fn test_create_title_boundary() {
        let svc = service();
        assert!(svc.create_note("a".repeat(100), String::new()).is_ok());

        let err = validation(svc.create_note("a".repeat(101), String::new()));
        assert_eq!(err, NoteValidationError::TitleTooLong { max: 100, got: 101 });
        assert_eq!(svc.get_all_notes().unwrap().len(), 1);
    }

    #[test]
    fn test_create_content_boundary() {
        let svc = service();
        assert!(svc.create_note("t".to_string(), "c".repeat(5000)).is_ok());

        let err = validation(svc.create_note("t".to_string(), "c".repeat(5001)));
        assert_eq!(
            err,
            NoteValidationError::ContentTooLong {
                max: 5000,
                got: 5001
            }
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        let svc = service();
        // 100 two-byte characters is still 100 characters
        assert!(svc.create_note("é".repeat(100), String::new()).is_ok());
    }

    #[test]
    fn test_create_respects_note_count_limit() {
        let limits = NoteLimits {
            max_note_count: Some(2),
            ..NoteLimits::default()
        };
        let svc = NoteService::new(Box::new(MemoryBackend::new()), limits);
        svc.create_note("a".to_string(), String::new()).unwrap();
        let b = svc.create_note("b".to_string(), String::new()).unwrap();

        let err = validation(svc.create_note("c".to_string(), String::new()));
        assert_eq!(err, NoteValidationError::NoteCountLimit { max: 2 });

        // Room frees up again after a delete
        svc.delete_note(b.id).unwrap();
        assert!(svc.create_note("c".to_string(), String::new()).is_ok());
    }

    #[test]
    fn test_get_deleted_note() {
        let svc = service();
        let note = svc.create_note("a".to_string(), String::new()).unwrap();
        svc.delete_note(note.id).unwrap();
        assert!(matches!(
            svc.get_note_by_id(note.id),
            Err(NoteError::NotFound(id)) if id == note.id
        ));
    }

    #[test]
    fn test_update_missing_wins_over_validation() {
        let svc = service();
        let result = svc.update_note(99, &"a".repeat(101), &"c".repeat(5001));
        assert!(matches!(result, Err(NoteError::NotFound(99))));
    }

    #[test]
    fn test_update_validates_non_empty_fields() {
        let svc = service();
        let note = svc
            .create_note("title".to_string(), "body".to_string())
            .unwrap();

        let err = validation(svc.update_note(note.id, &"a".repeat(101), ""));
        assert!(matches!(err, NoteValidationError::TitleTooLong { .. }));

        let err = validation(svc.update_note(note.id, "", &"c".repeat(5001)));
        assert!(matches!(err, NoteValidationError::ContentTooLong { .. }));

        // Nothing was written by the rejected updates
        let stored = svc.get_note_by_id(note.id).unwrap();
        assert_eq!(stored, note);
    }

    #[test]
    fn test_update_empty_title_keeps_title() {
        let svc = service();
        let note = svc
            .create_note("title".to_string(), "body".to_string())
            .unwrap();

        let updated = svc.update_note(note.id, "", "new body").unwrap();
        assert_eq!(updated.title, "title");
        assert_eq!(updated.content, "new body");
        assert_eq!(updated.created_at, note.created_at);
        let updated_at = updated.updated_at.expect("updated_at should be set");
        assert!(updated_at >= updated.created_at);
    }

    #[test]
    fn test_update_nothing_still_sets_updated_at() {
        let svc = service();
        let note = svc
            .create_note("title".to_string(), "body".to_string())
            .unwrap();

        let updated = svc.update_note(note.id, "", "").unwrap();
        assert_eq!(updated.title, note.title);
        assert_eq!(updated.content, note.content);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_create_list_delete_scenario() {
        let svc = service();
        let a = svc.create_note("A".to_string(), "a1".to_string()).unwrap();
        let b = svc.create_note("B".to_string(), "b1".to_string()).unwrap();

        let all = svc.get_all_notes().unwrap();
        assert_eq!(all, vec![a.clone(), b.clone()]);

        svc.delete_note(a.id).unwrap();
        assert_eq!(svc.get_all_notes().unwrap(), vec![b]);
        assert!(matches!(
            svc.get_note_by_id(a.id),
            Err(NoteError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let svc = service();
        let note = svc.create_note("a".to_string(), String::new()).unwrap();
        svc.delete_note(note.id).unwrap();
        assert!(matches!(
            svc.delete_note(note.id),
            Err(NoteError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_note(note.id),
            Err(NoteError::NotFound(_))
        ));
    }
}
