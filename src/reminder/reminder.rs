use chrono::NaiveDateTime;

/// Format the date and time inputs are joined and parsed with.
pub const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub when: NaiveDateTime,
    pub title: String,
    pub message: String,
}

impl Reminder {
    pub fn new(when: NaiveDateTime, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            when,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.when <= now
    }

    pub fn when_display(&self) -> String {
        self.when.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Parse the separate date (`YYYY-MM-DD`) and time (`HH:MM`) inputs.
pub fn parse_when(date_text: &str, time_text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(&format!("{date_text} {time_text}"), INPUT_FORMAT)
}
