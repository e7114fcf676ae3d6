use chrono::{NaiveDateTime, TimeDelta};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::reminder::Reminder;
use crate::theme::Theme;

pub struct PendingList;

impl PendingList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        reminders: &[&Reminder],
        now: NaiveDateTime,
        theme: &Theme,
    ) {
        let w = area.width as usize;

        let title = if w >= 25 {
            format!(" Scheduled ({}) ", reminders.len())
        } else {
            " Scheduled ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        if reminders.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No reminders scheduled").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = reminders
            .iter()
            .map(|reminder| {
                let when = format!(" {} ", reminder.when_display());
                let countdown = format!(" in {} ", format_countdown(reminder.when - now));
                let room = inner_w.saturating_sub(when.len() + countdown.len());
                let text = truncate(&format!("{}: {}", reminder.title, reminder.message), room);
                let padding = " ".repeat(room.saturating_sub(text.chars().count()));

                ListItem::new(Line::from(vec![
                    Span::styled(when, theme.active),
                    Span::styled(text, Style::default()),
                    Span::raw(padding),
                    Span::styled(countdown, theme.dim),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

/// Coarse "time left" label: `2d 3h`, `3h 05m`, `4m 10s`, `12s`.
pub fn format_countdown(left: TimeDelta) -> String {
    let total = left.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        total % 86_400 / 3_600,
        total % 3_600 / 60,
        total % 60,
    );

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max).collect()
    }
}
