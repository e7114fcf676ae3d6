use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Reader, Xlsx};
use chrono::{DurationRound, NaiveDateTime, TimeDelta};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::reminder::Reminder;
use super::store::ReminderStore;
use crate::error::StorageError;

pub const HEADER: [&str; 3] = ["Datetime", "Title", "Message"];

const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const TEXT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone)]
pub struct XlsxStore {
    path: PathBuf,
}

impl XlsxStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, row: usize, reason: impl Into<String>) -> StorageError {
        StorageError::Malformed {
            path: self.path.clone(),
            row,
            reason: reason.into(),
        }
    }

    fn decode_row(&self, row_number: usize, cells: &[Data]) -> Result<Reminder, StorageError> {
        let when = cells
            .first()
            .and_then(cell_datetime)
            .ok_or_else(|| self.malformed(row_number, "Datetime is not a date-time value"))?;
        let title = cells.get(1).map(ToString::to_string).unwrap_or_default();
        let message = cells.get(2).map(ToString::to_string).unwrap_or_default();
        Ok(Reminder::new(when, title, message))
    }

    fn write_workbook(&self, reminders: &[Reminder]) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

        for (col, name) in HEADER.iter().enumerate() {
            sheet.write_string(0, col as u16, *name)?;
        }
        for (index, reminder) in reminders.iter().enumerate() {
            let row = (index + 1) as u32;
            sheet.write_datetime_with_format(row, 0, &reminder.when, &datetime_format)?;
            sheet.write_string(row, 1, reminder.title.as_str())?;
            sheet.write_string(row, 2, reminder.message.as_str())?;
        }
        sheet.set_column_width(0, 20)?;

        workbook.save(&self.path)
    }
}

impl ReminderStore for XlsxStore {
    fn load(&self) -> Result<Vec<Reminder>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "reminder file absent, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let read_error = |source| StorageError::Read {
            path: self.path.clone(),
            source,
        };
        let mut workbook: Xlsx<_> = Xlsx::new(BufReader::new(file)).map_err(read_error)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(read_error)?,
            None => return Ok(Vec::new()),
        };

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let names: Vec<String> = header.iter().map(ToString::to_string).collect();
        if names.len() < HEADER.len() || names[..HEADER.len()] != HEADER {
            return Err(self.malformed(1, format!("expected header {HEADER:?}, found {names:?}")));
        }

        let reminders = rows
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(|cell| cell.is_empty()))
            .map(|(index, cells)| self.decode_row(index + 2, cells))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(path = %self.path.display(), count = reminders.len(), "loaded reminders");
        Ok(reminders)
    }

    fn save(&self, reminders: &[Reminder]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        self.write_workbook(reminders)
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), count = reminders.len(), "saved reminders");
        Ok(())
    }
}

/// Date-time cells come back as serial numbers; round off the float noise.
fn cell_datetime(cell: &Data) -> Option<NaiveDateTime> {
    let parsed = match cell {
        Data::String(text) => TEXT_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text.trim(), format).ok()),
        other => other.as_datetime(),
    }?;
    Some(parsed.duration_round(TimeDelta::seconds(1)).unwrap_or(parsed))
}
