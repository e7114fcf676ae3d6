use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reminder_tui::app::App;
use reminder_tui::config::Config;
use reminder_tui::notify::{DesktopNotifier, Notifier};
use reminder_tui::reminder::{ReminderStore, XlsxStore};
use reminder_tui::{event, logging, tui, ui};
use tokio::time::MissedTickBehavior;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init(&config.log_path())?;

    let store = XlsxStore::new(&config.reminders_file);
    tracing::info!(file = %store.path().display(), "starting reminder app");
    let notifier = DesktopNotifier::new(&config.app_name, config.notification_timeout());
    let mut app = App::new(store, notifier, config.theme.clone().into_theme());
    app.check_previous_session(now())?;

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, config.check_interval()).await;
    tui::restore()?;

    if let Err(ref err) = result {
        tracing::error!(error = %err, "reminder app stopped");
    }
    result
}

async fn run<S: ReminderStore, N: Notifier>(
    terminal: &mut tui::Tui,
    app: &mut App<S, N>,
    check_interval: Duration,
) -> Result<()> {
    let mut keys = event::spawn_key_reader();
    let mut check = tokio::time::interval(check_interval);
    check.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while app.running {
        let drawn_at = now();
        terminal.draw(|frame| ui::render(frame, app, drawn_at))?;

        let next_fire = app.time_until_next_fire(now());
        tokio::select! {
            key = keys.recv() => match key {
                Some(key) => handle_key(app, key)?,
                None => app.quit(),
            },
            _ = sleep_until_fire(next_fire) => app.fire_due(now())?,
            // Catches deadlines missed while the machine was asleep.
            _ = check.tick() => app.fire_due(now())?,
        }
    }

    Ok(())
}

async fn sleep_until_fire(delay: Option<Duration>) {
    match delay {
        Some(delay) => tokio::time::sleep(delay).await,
        None => std::future::pending().await,
    }
}

fn handle_key<S: ReminderStore, N: Notifier>(app: &mut App<S, N>, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    // The error dialog is modal
    if app.error.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_error();
        }
        return Ok(());
    }

    app.status_message = None;
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => app.submit_form(now())?,
        KeyCode::Tab | KeyCode::Down => app.form_tab(),
        KeyCode::BackTab | KeyCode::Up => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        _ => {
            if let Some(c) = event::typed_char(&key) {
                app.form_input_char(c);
            }
        }
    }
    Ok(())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
