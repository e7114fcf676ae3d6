use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, message: Option<&str>, pending: usize, theme: &Theme) {
        let w = area.width as usize;

        let left = format!(" {} pending ", pending);

        let right = match message {
            Some(msg) => format!(" {} ", msg),
            None if w >= 60 => " Tab:Next field  Enter:Set reminder  Esc:Quit ".to_string(),
            None => " Esc:Quit ".to_string(),
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, theme.status),
            Span::styled(padding, theme.status),
            Span::styled(right, theme.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}
