use derive_setters::Setters;
use polars::error::PolarsError;
use std::fmt;
use std::io::Error;

use crate::pipeline::SortState;
use crate::ticket::{ColumnKey, StatusFilter};

#[derive(Debug)]
pub enum TicketError {
    IoError(Error),
    PolarsError(PolarsError),
    LoadingFailed(String),
    MissingColumn(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
    Logging(String),
}

impl fmt::Display for TicketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketError::IoError(e) => write!(f, "io error: {e}"),
            TicketError::PolarsError(e) => write!(f, "could not read data: {e}"),
            TicketError::LoadingFailed(msg) => write!(f, "loading failed: {msg}"),
            TicketError::MissingColumn(c) => write!(f, "data file has no \"{c}\" column"),
            TicketError::FileNotFound => write!(f, "file not found"),
            TicketError::PermissionDenied => write!(f, "permission denied"),
            TicketError::UnknownFileType => write!(f, "unknown file type, expected .csv"),
            TicketError::Logging(msg) => write!(f, "could not set up logging: {msg}"),
        }
    }
}

impl std::error::Error for TicketError {}

impl From<Error> for TicketError {
    fn from(err: Error) -> Self {
        TicketError::IoError(err)
    }
}

impl From<PolarsError> for TicketError {
    fn from(err: PolarsError) -> Self {
        TicketError::PolarsError(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveBeginning,
    MoveEnd,
    Search,
    ClearSearch,
    CycleStatus,
    Columns,
    PickerUp,
    PickerDown,
    ToggleColumn,
    ClearColumns,
    SortBy(ColumnKey),
    CopyRow,
    Help,
    Exit,
    Resize(usize, usize),
    RawKey(ratatui::crossterm::event::KeyEvent),
}

/// Startup configuration of the dashboard, assembled from command line arguments.
#[derive(Debug, Clone, Setters)]
pub struct TableConfig {
    pub event_poll_time: u64,
    pub initial_status: StatusFilter,
    pub initial_search: String,
    pub initial_columns: Vec<String>,
    pub initial_sort: SortState,
    pub placeholder: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            initial_status: StatusFilter::All,
            initial_search: String::new(),
            initial_columns: ColumnKey::ALL.iter().map(|c| c.key().to_string()).collect(),
            initial_sort: SortState::default(),
            placeholder: "Select columns...".to_string(),
        }
    }
}

pub const HELP_TEXT: &str = "\
Navigation
  j / Down        next ticket
  k / Up          previous ticket
  g / Home        first ticket
  G / End         last ticket

Filtering
  /               edit search term (Enter apply, Esc cancel)
  x               clear search term
  s               cycle status filter (All, Open, Closed, Pending)
  c               pick visible columns (Space toggle, Backspace clear)

Sorting
  1 .. 7          sort by column, again to flip direction

Other
  y               copy ticket row to clipboard
  ?               this help
  Esc             close popup
  q               quit";
