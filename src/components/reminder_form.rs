use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

const LABEL_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Message,
    Date,
    Time,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Message,
            FormField::Message => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Time,
            FormField::Message => FormField::Title,
            FormField::Date => FormField::Message,
            FormField::Time => FormField::Date,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title:",
            FormField::Message => "Message:",
            FormField::Date => "Date (YYYY-MM-DD):",
            FormField::Time => "Time (HH:MM):",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReminderFormState {
    pub title: String,
    pub message: String,
    pub date: String,
    pub time: String,
    pub active_field: FormField,
}

impl Default for ReminderFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            date: String::new(),
            time: String::new(),
            active_field: FormField::Title,
        }
    }
}

impl ReminderFormState {
    pub fn new() -> Self {
        Self::default()
    }

    fn value_mut(&mut self) -> &mut String {
        match self.active_field {
            FormField::Title => &mut self.title,
            FormField::Message => &mut self.message,
            FormField::Date => &mut self.date,
            FormField::Time => &mut self.time,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Message => &self.message,
            FormField::Date => &self.date,
            FormField::Time => &self.time,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.value_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn focus_prev(&mut self) {
        self.active_field = self.active_field.prev();
    }

    /// Empty every input and return focus to the title.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &ReminderFormState, theme: &Theme) {
        let block = Block::default()
            .title(" New Reminder ")
            .title_style(theme.active.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme.active);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // message
            Constraint::Length(1), // date
            Constraint::Length(1), // time
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let fields = [FormField::Title, FormField::Message, FormField::Date, FormField::Time];
        for (row, field) in rows.iter().zip(fields) {
            render_field(
                frame,
                *row,
                field.label(),
                state.value(field),
                state.active_field == field,
                theme,
            );
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Set Reminder ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Quit", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[5]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool, theme: &Theme) {
    let cursor = if active { "_" } else { "" };
    let style = if active { theme.active } else { Style::default() };

    let line = Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), theme.dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut field = FormField::Title;
        for expected in [FormField::Message, FormField::Date, FormField::Time, FormField::Title] {
            field = field.next();
            assert_eq!(field, expected);
        }
        assert_eq!(FormField::Title.prev(), FormField::Time);
        assert_eq!(FormField::Date.prev().next(), FormField::Date);
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut form = ReminderFormState::new();
        "Dentist".chars().for_each(|c| form.input_char(c));
        form.focus_next();
        "checkup".chars().for_each(|c| form.input_char(c));
        form.focus_next();
        "2030-01-09".chars().for_each(|c| form.input_char(c));
        form.focus_next();
        "08:3O".chars().for_each(|c| form.input_char(c));
        form.backspace();
        form.input_char('0');

        assert_eq!(form.title, "Dentist");
        assert_eq!(form.message, "checkup");
        assert_eq!(form.date, "2030-01-09");
        assert_eq!(form.time, "08:30");
    }

    #[test]
    fn clear_resets_values_and_focus() {
        let mut form = ReminderFormState::new();
        form.input_char('x');
        form.focus_prev();
        form.input_char('9');

        form.clear();

        assert!(form.title.is_empty());
        assert!(form.time.is_empty());
        assert_eq!(form.active_field, FormField::Title);
    }

    #[test]
    fn backspace_on_empty_field_is_harmless() {
        let mut form = ReminderFormState::new();
        form.backspace();
        assert!(form.title.is_empty());
    }
}
