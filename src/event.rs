use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Next key press, skipping releases and non-key events.
pub fn next_key_event(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    loop {
        match poll_event(timeout)? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}

/// Printable character of a key press. Chords with Ctrl, Alt or other
/// modifiers are shortcuts, not text.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => Some(c),
        _ => None,
    }
}

/// Read keys on a dedicated thread so the event loop can await them next to
/// its timers. The channel closes when the thread stops.
pub fn spawn_key_reader() -> UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || loop {
        match next_key_event(POLL_TIMEOUT) {
            Ok(Some(key)) => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(None) if tx.is_closed() => break,
            Ok(None) => {}
            Err(err) => {
                tracing::error!(error = %err, "terminal input failed");
                break;
            }
        }
    });
    rx
}
