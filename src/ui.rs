use chrono::NaiveDateTime;
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::App;
use crate::components::{ErrorDialog, PendingList, ReminderForm, StatusBar};
use crate::notify::Notifier;
use crate::reminder::ReminderStore;

pub fn render<S: ReminderStore, N: Notifier>(frame: &mut Frame, app: &App<S, N>, now: NaiveDateTime) {
    let area = frame.area();

    // Form, scheduled list, status bar
    let layout = Layout::vertical([
        Constraint::Length(8),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ReminderForm::render(frame, layout[0], &app.form, &app.theme);
    PendingList::render(frame, layout[1], &app.pending(), now, &app.theme);
    StatusBar::render(
        frame,
        layout[2],
        app.status_message.as_deref(),
        app.pending_count(),
        &app.theme,
    );

    if let Some(ref message) = app.error {
        ErrorDialog::render(frame, area, message, &app.theme);
    }
}
