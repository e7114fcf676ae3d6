use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct Schedule<T> {
    queue: BTreeMap<(NaiveDateTime, TaskId), T>,
    index: HashMap<TaskId, NaiveDateTime>,
    next_id: u64,
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            index: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Schedule<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, at: NaiveDateTime, item: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.insert((at, id), item);
        self.index.insert(id, at);
        id
    }

    #[allow(dead_code)]
    pub(crate) fn cancel(&mut self, id: TaskId) -> Option<T> {
        let at = self.index.remove(&id)?;
        self.queue.remove(&(at, id))
    }

    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    // Ties on fire time come out in arming order.
    pub fn pop_due(&mut self, now: NaiveDateTime) -> Vec<(TaskId, T)> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > now {
                break;
            }
            let ((_, id), item) = entry.remove_entry();
            self.index.remove(&id);
            due.push((id, item));
        }
        due
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskId, NaiveDateTime, &T)> {
        self.queue.iter().map(|((at, id), item)| (*id, *at, item))
    }

    pub fn drain(&mut self) -> Vec<(TaskId, T)> {
        self.index.clear();
        std::mem::take(&mut self.queue)
            .into_iter()
            .map(|((_, id), item)| (id, item))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
