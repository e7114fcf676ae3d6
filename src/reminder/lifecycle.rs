use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use tokio::sync::mpsc::UnboundedSender;

use super::reminder::{parse_when, Reminder};
use super::schedule::{Schedule, TaskId};
use super::store::ReminderStore;
use crate::error::{ReminderError, Result};
use crate::notify::Notifier;

pub const EMPTY_FIELDS_MESSAGE: &str = "Please fill in all fields before setting a reminder.";
pub const PAST_TIME_MESSAGE: &str = "Invalid date and time. Please enter a future date and time.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Submitted { reminder: Reminder, delay: TimeDelta },
    Fired(Reminder),
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub id: TaskId,
    pub reminder: Reminder,
    pub delay: TimeDelta,
}

/// Rows found in storage that this process never armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviousSession {
    pub overdue: usize,
    pub orphaned: usize,
}

impl PreviousSession {
    pub fn is_empty(&self) -> bool {
        self.overdue == 0 && self.orphaned == 0
    }
}

pub struct Lifecycle<S, N> {
    store: S,
    notifier: N,
    schedule: Schedule<Reminder>,
    events: UnboundedSender<LifecycleEvent>,
}

impl<S: ReminderStore, N: Notifier> Lifecycle<S, N> {
    pub fn new(store: S, notifier: N, events: UnboundedSender<LifecycleEvent>) -> Self {
        Self {
            store,
            notifier,
            schedule: Schedule::new(),
            events,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Input problems are published as `Rejected` and returned; storage
    /// failures are only returned.
    pub fn submit(
        &mut self,
        title: &str,
        message: &str,
        date_text: &str,
        time_text: &str,
        now: NaiveDateTime,
    ) -> Result<Submitted> {
        let reminder = match validate(title, message, date_text, time_text, now) {
            Ok(reminder) => reminder,
            Err(err) => {
                tracing::info!(error = %err, "reminder rejected");
                self.publish(LifecycleEvent::Rejected(err.to_string()));
                return Err(err);
            }
        };

        self.store.append(reminder.clone())?;

        let delay = reminder.when - now;
        let id = self.schedule.arm(reminder.when, reminder.clone());
        tracing::info!(
            %id,
            when = %reminder.when,
            delay_secs = delay.num_seconds(),
            title = %reminder.title,
            "reminder scheduled"
        );
        self.publish(LifecycleEvent::Submitted {
            reminder: reminder.clone(),
            delay,
        });

        Ok(Submitted { id, reminder, delay })
    }

    pub fn fire_due(&mut self, now: NaiveDateTime) -> Result<usize> {
        let due = self.schedule.pop_due(now);
        let fired = due.len();

        for (id, reminder) in due {
            tracing::info!(%id, title = %reminder.title, "firing reminder");
            self.notifier.notify(&reminder.title, &reminder.message);

            let removed = self.store.prune(now)?;
            tracing::debug!(removed, "pruned completed reminders");

            self.publish(LifecycleEvent::Fired(reminder));
        }

        Ok(fired)
    }

    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.schedule.next_deadline()
    }

    pub fn time_until_next(&self, now: NaiveDateTime) -> Option<Duration> {
        self.next_deadline()
            .map(|at| (at - now).to_std().unwrap_or(Duration::ZERO))
    }

    pub fn pending(&self) -> impl Iterator<Item = &Reminder> {
        self.schedule.iter().map(|(_, _, reminder)| reminder)
    }

    pub fn pending_count(&self) -> usize {
        self.schedule.len()
    }

    // Timers are not persisted, so nothing found here is re-armed.
    pub fn previous_session(&self, now: NaiveDateTime) -> Result<PreviousSession> {
        let rows = self.store.load()?;
        let mut session = PreviousSession::default();
        for row in &rows {
            if row.is_due(now) {
                session.overdue += 1;
            } else if !self.pending().any(|armed| armed == row) {
                session.orphaned += 1;
            }
        }
        Ok(session)
    }

    pub fn shutdown(&mut self) -> usize {
        let dropped = self.schedule.drain().len();
        if dropped > 0 {
            tracing::warn!(dropped, "exiting with armed reminders; they will not fire");
        }
        dropped
    }

    fn publish(&self, event: LifecycleEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("no lifecycle subscriber");
        }
    }
}

fn validate(
    title: &str,
    message: &str,
    date_text: &str,
    time_text: &str,
    now: NaiveDateTime,
) -> Result<Reminder> {
    if [title, message, date_text, time_text].iter().any(|field| field.is_empty()) {
        return Err(ReminderError::Validation(EMPTY_FIELDS_MESSAGE.to_string()));
    }

    let when = parse_when(date_text, time_text).map_err(|source| ReminderError::Parse {
        message: format!(
            "Could not read \"{date_text} {time_text}\" as a date and time ({source}). \
             Use YYYY-MM-DD and HH:MM."
        ),
        source,
    })?;

    if when - now < TimeDelta::zero() {
        return Err(ReminderError::Validation(PAST_TIME_MESSAGE.to_string()));
    }

    Ok(Reminder::new(when, title, message))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::reminder::store::FailingStore;
    use crate::reminder::MemoryStore;

    type TestLifecycle = Lifecycle<MemoryStore, RecordingNotifier>;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 30, 15)
            .unwrap()
    }

    fn lifecycle_with(store: MemoryStore) -> (TestLifecycle, UnboundedReceiver<LifecycleEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Lifecycle::new(store, RecordingNotifier::default(), tx), rx)
    }

    fn lifecycle() -> (TestLifecycle, UnboundedReceiver<LifecycleEvent>) {
        lifecycle_with(MemoryStore::new())
    }

    fn drain(rx: &mut UnboundedReceiver<LifecycleEvent>) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn any_empty_field_is_rejected_without_writing() {
        let inputs = [
            ("", "msg", "2999-01-01", "00:00"),
            ("title", "", "2999-01-01", "00:00"),
            ("title", "msg", "", "00:00"),
            ("title", "msg", "2999-01-01", ""),
        ];

        for (title, message, date, time) in inputs {
            let (mut lc, mut rx) = lifecycle();
            let err = lc.submit(title, message, date, time, now()).unwrap_err();

            assert!(matches!(err, ReminderError::Validation(ref m) if m == EMPTY_FIELDS_MESSAGE));
            assert_eq!(lc.store().save_count(), 0);
            assert_eq!(lc.pending_count(), 0);
            assert_eq!(
                drain(&mut rx),
                vec![LifecycleEvent::Rejected(EMPTY_FIELDS_MESSAGE.to_string())]
            );
        }
    }

    #[test]
    fn far_future_submission_persists_and_arms() {
        let (mut lc, mut rx) = lifecycle();

        let submitted = lc
            .submit("Title", "Message", "2999-01-01", "00:00", now())
            .unwrap();

        assert!(submitted.delay > TimeDelta::zero());
        assert_eq!(lc.store().rows(), vec![submitted.reminder.clone()]);
        assert_eq!(lc.pending_count(), 1);
        assert_eq!(lc.next_deadline(), Some(submitted.reminder.when));
        assert_eq!(
            drain(&mut rx),
            vec![LifecycleEvent::Submitted {
                reminder: submitted.reminder,
                delay: submitted.delay,
            }]
        );
    }

    #[test]
    fn past_time_is_rejected() {
        let (mut lc, mut rx) = lifecycle();

        let err = lc
            .submit("Title", "Message", "2026-10-18", "14:29", now())
            .unwrap_err();

        assert!(matches!(err, ReminderError::Validation(ref m) if m == PAST_TIME_MESSAGE));
        assert!(lc.store().rows().is_empty());
        assert_eq!(lc.pending_count(), 0);
        assert_eq!(drain(&mut rx), vec![LifecycleEvent::Rejected(PAST_TIME_MESSAGE.to_string())]);
    }

    #[test]
    fn zero_delay_is_accepted() {
        let (mut lc, _rx) = lifecycle();
        let exactly_now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();

        let submitted = lc
            .submit("T", "M", "2026-10-18", "14:30", exactly_now)
            .unwrap();

        assert_eq!(submitted.delay, TimeDelta::zero());
        assert_eq!(lc.time_until_next(exactly_now), Some(Duration::ZERO));
    }

    #[test]
    fn malformed_date_is_a_parse_error() {
        let (mut lc, mut rx) = lifecycle();

        let err = lc.submit("T", "M", "18/10/2026", "10:00", now()).unwrap_err();

        assert!(matches!(err, ReminderError::Parse { .. }));
        assert!(err.is_user_facing());
        assert_eq!(lc.store().save_count(), 0);
        assert!(matches!(drain(&mut rx).as_slice(), [LifecycleEvent::Rejected(_)]));
    }

    #[test]
    fn firing_notifies_prunes_and_publishes() {
        let stale = Reminder::new(now() - TimeDelta::days(3), "old", "from last week");
        let (mut lc, mut rx) = lifecycle_with(MemoryStore::with_rows(vec![stale]));
        let soon = lc.submit("Tea", "kettle", "2026-10-18", "14:45", now()).unwrap();
        let later = lc.submit("Call", "mum", "2026-10-18", "18:00", now()).unwrap();
        drain(&mut rx);

        assert_eq!(lc.fire_due(now()).unwrap(), 0);

        let fire_time = soon.reminder.when + TimeDelta::seconds(1);
        assert_eq!(lc.fire_due(fire_time).unwrap(), 1);

        assert_eq!(
            lc.notifier().sent(),
            vec![("Tea".to_string(), "kettle".to_string())]
        );
        assert_eq!(lc.store().rows(), vec![later.reminder.clone()]);
        assert_eq!(drain(&mut rx), vec![LifecycleEvent::Fired(soon.reminder)]);
        assert_eq!(lc.next_deadline(), Some(later.reminder.when));
    }

    #[test]
    fn reminders_fire_in_time_order() {
        let (mut lc, _rx) = lifecycle();
        lc.submit("second", "b", "2026-10-18", "16:00", now()).unwrap();
        lc.submit("first", "a", "2026-10-18", "15:00", now()).unwrap();

        let evening = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        assert_eq!(lc.fire_due(evening).unwrap(), 2);

        let titles: Vec<_> = lc.notifier().sent().into_iter().map(|(t, _)| t).collect();
        assert_eq!(titles, ["first", "second"]);
        assert!(lc.store().rows().is_empty());
    }

    #[test]
    fn previous_session_counts_unarmed_rows() {
        let rows = vec![
            Reminder::new(now() - TimeDelta::hours(1), "missed", ""),
            Reminder::new(now() + TimeDelta::hours(1), "orphan", ""),
        ];
        let (mut lc, _rx) = lifecycle_with(MemoryStore::with_rows(rows));
        lc.submit("mine", "armed", "2026-10-19", "09:00", now()).unwrap();

        let session = lc.previous_session(now()).unwrap();

        assert_eq!(session, PreviousSession { overdue: 1, orphaned: 1 });
        assert!(!session.is_empty());
    }

    #[test]
    fn shutdown_drops_timers_but_keeps_rows() {
        let (mut lc, _rx) = lifecycle();
        lc.submit("a", "b", "2999-01-01", "00:00", now()).unwrap();

        assert_eq!(lc.shutdown(), 1);
        assert_eq!(lc.pending_count(), 0);
        assert_eq!(lc.store().rows().len(), 1);
    }

    #[test]
    fn submit_survives_closed_subscriber() {
        let (mut lc, rx) = lifecycle();
        drop(rx);
        assert!(lc.submit("a", "b", "2999-01-01", "00:00", now()).is_ok());
    }

    #[test]
    fn failed_save_arms_nothing_and_publishes_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut lc = Lifecycle::new(FailingStore::default(), RecordingNotifier::default(), tx);

        let err = lc
            .submit("Title", "Message", "2999-01-01", "00:00", now())
            .unwrap_err();

        assert!(matches!(err, ReminderError::Storage(_)));
        assert!(!err.is_user_facing());
        assert_eq!(lc.pending_count(), 0);
        assert_eq!(lc.next_deadline(), None);
        assert!(drain(&mut rx).is_empty());
    }
}
