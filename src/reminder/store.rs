use std::cell::{Cell, RefCell};

use chrono::NaiveDateTime;

use super::reminder::Reminder;
use crate::error::StorageError;

/// Whole-table persistence: every mutation reads the full table and writes it
/// back.
pub trait ReminderStore {
    /// A missing backing file is an empty table.
    fn load(&self) -> Result<Vec<Reminder>, StorageError>;

    fn save(&self, reminders: &[Reminder]) -> Result<(), StorageError>;

    fn append(&self, reminder: Reminder) -> Result<(), StorageError> {
        let mut reminders = self.load()?;
        reminders.push(reminder);
        self.save(&reminders)
    }

    /// Drop every reminder that is no longer in the future and return how
    /// many were removed. Always writes, so a missing file becomes an empty
    /// table.
    fn prune(&self, now: NaiveDateTime) -> Result<usize, StorageError> {
        let mut reminders = self.load()?;
        let before = reminders.len();
        reminders.retain(|r| r.when > now);
        self.save(&reminders)?;
        Ok(before - reminders.len())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<Reminder>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Reminder>) -> Self {
        Self {
            rows: RefCell::new(rows),
            saves: Cell::new(0),
        }
    }

    pub fn rows(&self) -> Vec<Reminder> {
        self.rows.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ReminderStore for MemoryStore {
    fn load(&self) -> Result<Vec<Reminder>, StorageError> {
        Ok(self.rows())
    }

    fn save(&self, reminders: &[Reminder]) -> Result<(), StorageError> {
        *self.rows.borrow_mut() = reminders.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore {
    rows: RefCell<Vec<Reminder>>,
}

#[cfg(test)]
impl ReminderStore for FailingStore {
    fn load(&self) -> Result<Vec<Reminder>, StorageError> {
        Ok(self.rows.borrow().clone())
    }

    fn save(&self, _reminders: &[Reminder]) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: "reminders.xlsx".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}
