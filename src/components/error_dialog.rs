use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

pub struct ErrorDialog;

impl ErrorDialog {
    pub fn render(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
        let popup_w = area.width.min(56).max(24);
        let popup_h = area.height.min(8).max(5);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Error ")
            .title_style(theme.error)
            .borders(Borders::ALL)
            .border_style(theme.error);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let text = Paragraph::new(message).wrap(Wrap { trim: true });
        frame.render_widget(text, rows[0]);

        let ok = Line::from(vec![
            Span::styled("[ OK ]", Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)),
            Span::styled(" Enter/Esc", theme.dim),
        ])
        .centered();
        frame.render_widget(Paragraph::new(ok), rows[1]);
    }
}
