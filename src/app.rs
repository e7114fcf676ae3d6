use chrono::NaiveDateTime;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::components::ReminderFormState;
use crate::error::Result;
use crate::notify::Notifier;
use crate::reminder::{Lifecycle, LifecycleEvent, Reminder, ReminderStore};
use crate::theme::Theme;

/// Presentation state. Owns the lifecycle manager and reacts to the events
/// it publishes.
pub struct App<S, N> {
    pub running: bool,
    pub form: ReminderFormState,
    /// Message of the open error dialog. While set, input goes to the dialog.
    pub error: Option<String>,
    pub status_message: Option<String>,
    pub theme: Theme,
    lifecycle: Lifecycle<S, N>,
    events: UnboundedReceiver<LifecycleEvent>,
}

impl<S: ReminderStore, N: Notifier> App<S, N> {
    pub fn new(store: S, notifier: N, theme: Theme) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            running: true,
            form: ReminderFormState::new(),
            error: None,
            status_message: None,
            theme,
            lifecycle: Lifecycle::new(store, notifier, tx),
            events,
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle<S, N> {
        &self.lifecycle
    }

    pub fn check_previous_session(&mut self, now: NaiveDateTime) -> Result<()> {
        let session = self.lifecycle.previous_session(now)?;
        if session.is_empty() {
            return Ok(());
        }
        tracing::warn!(
            overdue = session.overdue,
            orphaned = session.orphaned,
            "reminders from a previous session will not fire"
        );
        self.status_message = Some(format!(
            "{} stored reminder(s) from a previous session will not fire",
            session.overdue + session.orphaned
        ));
        Ok(())
    }

    pub fn form_input_char(&mut self, c: char) {
        self.form.input_char(c);
    }

    pub fn form_backspace(&mut self) {
        self.form.backspace();
    }

    pub fn form_tab(&mut self) {
        self.form.focus_next();
    }

    pub fn form_backtab(&mut self) {
        self.form.focus_prev();
    }

    // Rejected input surfaces through the error dialog; only storage
    // failures come back as `Err`.
    pub fn submit_form(&mut self, now: NaiveDateTime) -> Result<()> {
        let result = self.lifecycle.submit(
            &self.form.title,
            &self.form.message,
            &self.form.date,
            &self.form.time,
            now,
        );
        self.drain_events();
        match result {
            Ok(submitted) => {
                tracing::debug!(id = %submitted.id, "form submitted");
                Ok(())
            }
            Err(err) if err.is_user_facing() => Ok(()),
            Err(err) => Err(err),
        }
    }

    pub fn fire_due(&mut self, now: NaiveDateTime) -> Result<()> {
        self.lifecycle.fire_due(now)?;
        self.drain_events();
        Ok(())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
        self.lifecycle.shutdown();
    }

    pub fn time_until_next_fire(&self, now: NaiveDateTime) -> Option<std::time::Duration> {
        self.lifecycle.time_until_next(now)
    }

    pub fn pending(&self) -> Vec<&Reminder> {
        self.lifecycle.pending().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.lifecycle.pending_count()
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.on_lifecycle_event(event);
        }
    }

    fn on_lifecycle_event(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Submitted { reminder, .. } => {
                self.status_message = Some(format!(
                    "Reminder \"{}\" set for {}",
                    reminder.title,
                    reminder.when_display()
                ));
            }
            LifecycleEvent::Fired(reminder) => {
                self.form.clear();
                self.status_message = Some(format!("Reminder: {}", reminder.title));
            }
            LifecycleEvent::Rejected(message) => {
                self.error = Some(message);
            }
        }
    }
}
