//! Student registry.
//!
//! The registry owns the in-memory student sequence, the draft record bound
//! to the entry form, and the mirroring of both to persistent storage. Every
//! mutation persists the full sequence as a side effect; callers never issue
//! a separate save step.
//!
//! Records have positional identity only. There is no delete and no lookup
//! by field. Two processes sharing one database will clobber each other's
//! writes, last write wins; resolving that is explicitly out of scope.

use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, STUDENTS_KEY};
use crate::student::StudentRecord;

/// In-memory student list mirrored to persistent storage.
#[derive(Debug)]
pub struct StudentRegistry<'a, S: KeyValueStore> {
    store: &'a S,
    students: Vec<StudentRecord>,
    draft: StudentRecord,
}

impl<'a, S: KeyValueStore> StudentRegistry<'a, S> {
    /// Create an empty registry over the given backing storage.
    ///
    /// The in-memory sequence starts empty; call
    /// [`load_students`](Self::load_students) once at startup to pick up
    /// previously persisted records.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            students: Vec::new(),
            draft: StudentRecord::default(),
        }
    }

    /// The current student sequence.
    #[must_use]
    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    /// Number of registered students.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Check whether the registry holds no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// The draft record bound to the entry form.
    #[must_use]
    pub fn draft(&self) -> &StudentRecord {
        &self.draft
    }

    /// Mutable access to the draft record for form binding.
    pub fn draft_mut(&mut self) -> &mut StudentRecord {
        &mut self.draft
    }

    /// Append the current draft to the sequence and reset the draft.
    ///
    /// The sequence is persisted after the append and before the draft
    /// reset, so a failure mid-operation never silently loses the record: on
    /// a persist error the draft is left intact for retry.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the sequence fails.
    pub fn add_student(&mut self) -> Result<()> {
        self.students.push(self.draft.clone());
        self.persist()?;
        self.draft = StudentRecord::default();

        debug!("Added student, {} now registered", self.students.len());
        Ok(())
    }

    /// Replace the record at `index` with `record`.
    ///
    /// An out-of-range index is a silent no-op, not an error. That is
    /// intentional defensive behavior carried over from the original form
    /// handling, where stale indices could reach this path.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the sequence fails.
    pub fn update_student(&mut self, index: usize, record: StudentRecord) -> Result<()> {
        if index >= self.students.len() {
            debug!(index, "Ignoring update for out-of-range index");
            return Ok(());
        }

        self.students[index] = record;
        self.persist()
    }

    /// Replace the in-memory sequence with the persisted copy.
    ///
    /// If nothing has been persisted yet the in-memory sequence is left
    /// untouched. Intended to be called once at startup, not on every read.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails or the persisted
    /// sequence cannot be decoded.
    pub fn load_students(&mut self) -> Result<()> {
        let Some(raw) = self.store.get(STUDENTS_KEY)? else {
            return Ok(());
        };

        self.students = serde_json::from_str(&raw)
            .map_err(|source| Error::value_decode(STUDENTS_KEY, source))?;
        debug!("Loaded {} students from storage", self.students.len());
        Ok(())
    }

    /// Serialize the whole sequence and overwrite the persisted copy.
    fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string(&self.students)?;
        self.store.set(STUDENTS_KEY, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capitalize::capitalize;
    use crate::storage::MemoryStore;

    fn sample(first_name: &str) -> StudentRecord {
        StudentRecord {
            first_name: first_name.to_string(),
            middle_initial: "Q".to_string(),
            last_name: "reyes".to_string(),
            birth_day: "2005-01-20".to_string(),
            age: 20,
            address: "14 Mabini Street, Quezon City".to_string(),
            courses: vec!["BSIT".to_string(), "GE-101".to_string()],
        }
    }

    #[test]
    fn test_add_student_appends_and_resets_draft() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        *registry.draft_mut() = sample("ana");
        registry.add_student().unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.students()[0].first_name, "ana");
        assert!(registry.draft().is_blank());
    }

    #[test]
    fn test_add_student_persists_before_draft_reset() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        *registry.draft_mut() = sample("ben");
        registry.add_student().unwrap();

        let raw = store.get(STUDENTS_KEY).unwrap().unwrap();
        assert!(raw.contains("ben"));
    }

    #[test]
    fn test_update_student_in_range_replaces_exactly_one() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        for name in ["ana", "ben", "carla"] {
            *registry.draft_mut() = sample(name);
            registry.add_student().unwrap();
        }

        registry.update_student(0, sample("alma")).unwrap();

        assert_eq!(registry.students()[0].first_name, "alma");
        assert_eq!(registry.students()[1].first_name, "ben");
        assert_eq!(registry.students()[2].first_name, "carla");
    }

    #[test]
    fn test_update_student_out_of_range_is_silent_noop() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        *registry.draft_mut() = sample("ana");
        registry.add_student().unwrap();
        let before = registry.students().to_vec();

        // Index equal to the length is the first out-of-range value; the
        // index type itself rules out anything below zero.
        registry.update_student(1, sample("zoe")).unwrap();
        registry.update_student(usize::MAX, sample("zoe")).unwrap();

        assert_eq!(registry.students(), before.as_slice());
    }

    #[test]
    fn test_update_student_persists_replacement() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        *registry.draft_mut() = sample("ana");
        registry.add_student().unwrap();
        registry.update_student(0, sample("alma")).unwrap();

        let raw = store.get(STUDENTS_KEY).unwrap().unwrap();
        assert!(raw.contains("alma"));
        assert!(!raw.contains("\"ana\""));
    }

    #[test]
    fn test_load_students_with_nothing_persisted_leaves_sequence_untouched() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        *registry.draft_mut() = sample("ana");
        registry.students.push(registry.draft.clone());

        registry.load_students().unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_round_trip_reproduces_all_records() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        let names = ["ana", "ben", "carla", "diego", "elena"];
        for name in names {
            *registry.draft_mut() = sample(name);
            registry.add_student().unwrap();
        }
        let written = registry.students().to_vec();

        // Fresh session over the same storage.
        let mut fresh = StudentRegistry::new(&store);
        fresh.load_students().unwrap();

        assert_eq!(fresh.students(), written.as_slice());
        assert_eq!(fresh.len(), names.len());
    }

    #[test]
    fn test_added_name_reads_capitalized_in_fresh_session() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        *registry.draft_mut() = sample("mary jane");
        registry.add_student().unwrap();

        let mut fresh = StudentRegistry::new(&store);
        fresh.load_students().unwrap();

        assert_eq!(capitalize(&fresh.students()[0].first_name), "Mary Jane");
    }

    #[test]
    fn test_load_students_malformed_payload_is_distinguishable() {
        let store = MemoryStore::new();
        store.set(STUDENTS_KEY, "not json").unwrap();

        let mut registry = StudentRegistry::new(&store);
        let err = registry.load_students().unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("students"));
    }

    #[test]
    fn test_duplicate_records_are_allowed() {
        let store = MemoryStore::new();
        let mut registry = StudentRegistry::new(&store);

        *registry.draft_mut() = sample("ana");
        registry.add_student().unwrap();
        *registry.draft_mut() = sample("ana");
        registry.add_student().unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.students()[0], registry.students()[1]);
    }
}
