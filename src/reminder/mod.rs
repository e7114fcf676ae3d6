pub mod lifecycle;
pub mod reminder;
pub mod schedule;
pub mod store;
pub mod xlsx;

pub use lifecycle::{Lifecycle, LifecycleEvent, PreviousSession, Submitted};
pub use reminder::Reminder;
pub use schedule::{Schedule, TaskId};
pub use store::{MemoryStore, ReminderStore};
pub use xlsx::XlsxStore;
