use crate::domain::{Task, TaskFields};
use crate::persistence::{KeyValueStore, TASKS_KEY};
use anyhow::{Context, Result};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no task with id {0}")]
    UnknownId(Uuid),
}

/// Explicit save operation, tagged at the call site instead of inferred from
/// whether an id happens to be present
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOp {
    New(TaskFields),
    Replace(Uuid, TaskFields),
}

/// Exclusive owner of the in-memory task collection and the single-slot
/// undo buffer.
///
/// Every mutation serializes the whole collection and writes it under the
/// fixed store key before returning.
pub struct TaskRepository {
    tasks: Vec<Task>,
    /// The most recently deleted task, restorable exactly once. A second
    /// delete before undo overwrites the slot.
    recently_deleted: Option<Task>,
    store: Box<dyn KeyValueStore>,
}

impl TaskRepository {
    /// Load the collection from the store. A missing or corrupt blob is
    /// treated as an empty collection, never an error.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let tasks = match store.get(TASKS_KEY) {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(tasks) => tasks,
                Err(e) => {
                    log::warn!("discarding unreadable task collection: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            tasks,
            recently_deleted: None,
            store,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether the undo slot is occupied
    pub fn has_pending_undo(&self) -> bool {
        self.recently_deleted.is_some()
    }

    /// Assign a fresh id, append, persist
    pub fn create(&mut self, fields: TaskFields) -> Result<Task> {
        let task = Task::new(fields);
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Strict in-place replace: the id must already exist. Order and
    /// membership of the rest of the collection are unchanged.
    pub fn replace(&mut self, id: Uuid, fields: TaskFields) -> Result<Task> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::UnknownId(id))?;
        *slot = Task::with_id(id, fields);
        let task = slot.clone();
        self.persist()?;
        Ok(task)
    }

    /// Replace in place when the id exists, append otherwise. This is the
    /// source program's observed update behavior, kept as its own operation.
    pub fn upsert(&mut self, task: Task) -> Result<Task> {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task.clone(),
            None => self.tasks.push(task.clone()),
        }
        self.persist()?;
        Ok(task)
    }

    /// Dispatch an explicit save operation
    pub fn save(&mut self, op: SaveOp) -> Result<Task> {
        match op {
            SaveOp::New(fields) => self.create(fields),
            SaveOp::Replace(id, fields) => self.upsert(Task::with_id(id, fields)),
        }
    }

    /// Remove the matching task, stash it in the undo slot, persist. Returns
    /// `None` when the id is unknown (the slot is left untouched).
    pub fn delete(&mut self, id: Uuid) -> Result<Option<Task>> {
        let position = match self.tasks.iter().position(|t| t.id == id) {
            Some(position) => position,
            None => return Ok(None),
        };
        let removed = self.tasks.remove(position);
        self.recently_deleted = Some(removed.clone());
        self.persist()?;
        Ok(Some(removed))
    }

    /// Restore the stashed task, appending at the end (not its original
    /// position), and clear the slot. No-op when the slot is empty.
    pub fn undo_delete(&mut self) -> Result<Option<Task>> {
        let restored = match self.recently_deleted.take() {
            Some(task) => task,
            None => return Ok(None),
        };
        self.tasks.push(restored.clone());
        self.persist()?;
        Ok(Some(restored))
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.tasks).context("Failed to serialize tasks")?;
        self.store
            .set(TASKS_KEY, &blob)
            .context("Failed to write task collection")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Tag, TaskFields};
    use crate::persistence::MemoryStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn repo() -> TaskRepository {
        TaskRepository::load(Box::new(MemoryStore::new()))
    }

    fn fields(title: &str) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            ..TaskFields::blank(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap())
        }
    }

    #[test]
    fn test_create_assigns_fresh_id_and_stores_fields() {
        let mut repo = repo();
        let a = repo.create(fields("First")).unwrap();
        let b = repo.create(fields("Second")).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.tasks().len(), 2);
        assert_eq!(repo.tasks()[0].title, "First");
        assert_eq!(repo.tasks()[1].title, "Second");
    }

    #[test]
    fn test_replace_preserves_order_and_membership() {
        let mut repo = repo();
        let a = repo.create(fields("A")).unwrap();
        let b = repo.create(fields("B")).unwrap();
        let c = repo.create(fields("C")).unwrap();

        repo.replace(b.id, fields("B2")).unwrap();

        let titles: Vec<_> = repo.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B2", "C"]);
        assert_eq!(repo.tasks()[0].id, a.id);
        assert_eq!(repo.tasks()[1].id, b.id);
        assert_eq!(repo.tasks()[2].id, c.id);
    }

    #[test]
    fn test_replace_unknown_id_is_an_error() {
        let mut repo = repo();
        repo.create(fields("Only")).unwrap();

        let result = repo.replace(Uuid::new_v4(), fields("Ghost"));
        assert!(result.is_err());
        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(repo.tasks()[0].title, "Only");
    }

    #[test]
    fn test_upsert_unknown_id_appends() {
        let mut repo = repo();
        repo.create(fields("Existing")).unwrap();

        let ghost = Task::new(fields("Ghost"));
        repo.upsert(ghost.clone()).unwrap();

        assert_eq!(repo.tasks().len(), 2);
        assert_eq!(repo.tasks()[1].id, ghost.id);
    }

    #[test]
    fn test_upsert_known_id_replaces_in_place() {
        let mut repo = repo();
        let a = repo.create(fields("A")).unwrap();
        repo.create(fields("B")).unwrap();

        repo.upsert(Task::with_id(a.id, fields("A2"))).unwrap();

        let titles: Vec<_> = repo.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A2", "B"]);
    }

    #[test]
    fn test_delete_then_undo_restores_at_end() {
        let mut repo = repo();
        let a = repo.create(fields("A")).unwrap();
        repo.create(fields("B")).unwrap();

        let removed = repo.delete(a.id).unwrap();
        assert_eq!(removed.as_ref().map(|t| t.id), Some(a.id));
        assert_eq!(repo.tasks().len(), 1);
        assert!(repo.has_pending_undo());

        let restored = repo.undo_delete().unwrap();
        assert_eq!(restored.map(|t| t.id), Some(a.id));
        assert!(!repo.has_pending_undo());

        // Restored at the end, not its original position
        let titles: Vec<_> = repo.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_second_undo_is_a_noop() {
        let mut repo = repo();
        let a = repo.create(fields("A")).unwrap();
        repo.delete(a.id).unwrap();
        repo.undo_delete().unwrap();

        assert_eq!(repo.undo_delete().unwrap(), None);
        assert_eq!(repo.tasks().len(), 1);
    }

    #[test]
    fn test_second_delete_overwrites_undo_slot() {
        let mut repo = repo();
        let a = repo.create(fields("A")).unwrap();
        let b = repo.create(fields("B")).unwrap();

        repo.delete(a.id).unwrap();
        repo.delete(b.id).unwrap();

        // Only the second deletion is recoverable
        let restored = repo.undo_delete().unwrap().unwrap();
        assert_eq!(restored.id, b.id);
        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(repo.undo_delete().unwrap(), None);
    }

    #[test]
    fn test_delete_unknown_id_leaves_slot_alone() {
        let mut repo = repo();
        let a = repo.create(fields("A")).unwrap();
        repo.delete(a.id).unwrap();

        assert_eq!(repo.delete(Uuid::new_v4()).unwrap(), None);
        // The earlier deletion is still recoverable
        assert!(repo.has_pending_undo());
    }

    #[test]
    fn test_save_op_dispatch() {
        let mut repo = repo();
        let created = repo.save(SaveOp::New(fields("New"))).unwrap();
        assert_eq!(repo.tasks().len(), 1);

        repo.save(SaveOp::Replace(created.id, fields("Edited"))).unwrap();
        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(repo.tasks()[0].title, "Edited");
    }

    #[test]
    fn test_mutations_persist_to_store() {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, "[]").unwrap();
        let mut repo = TaskRepository::load(Box::new(store));

        let a = repo.create(fields("Persisted")).unwrap();

        // Reload through a fresh repository sharing nothing but the blob
        let blob = serde_json::to_string(repo.tasks()).unwrap();
        let mut fresh = MemoryStore::new();
        fresh.set(TASKS_KEY, &blob).unwrap();
        let reloaded = TaskRepository::load(Box::new(fresh));

        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(reloaded.tasks()[0], a);
    }

    #[test]
    fn test_load_corrupt_blob_is_empty() {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, "not json at all").unwrap();

        let repo = TaskRepository::load(Box::new(store));
        assert!(repo.tasks().is_empty());
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let repo = TaskRepository::load(Box::new(MemoryStore::new()));
        assert!(repo.tasks().is_empty());
    }

    #[test]
    fn test_collection_round_trip() {
        let mut repo = repo();
        let mut with_extras = fields("Full");
        with_extras.reminder_time = NaiveDate::from_ymd_opt(2026, 8, 26)
            .unwrap()
            .and_hms_opt(7, 30, 0);
        with_extras.sound_url = Some("/tmp/chime.mp3".to_string());
        with_extras.tag = Tag::Personal;
        repo.create(with_extras).unwrap();
        repo.create(fields("Bare")).unwrap();

        let blob = serde_json::to_string(repo.tasks()).unwrap();
        let back: Vec<Task> = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, repo.tasks());
    }
}
