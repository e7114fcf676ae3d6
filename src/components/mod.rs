pub mod error_dialog;
pub mod pending_list;
pub mod reminder_form;
pub mod status_bar;

pub use error_dialog::ErrorDialog;
pub use pending_list::PendingList;
pub use reminder_form::{ReminderForm, ReminderFormState};
pub use status_bar::StatusBar;
