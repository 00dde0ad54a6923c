use std::time::Duration;
use tracing::trace;

use crate::domain::{Message, TableConfig, TicketError};
use crate::model::{Modus, Model};
use ratatui::crossterm::event::{self, Event, KeyCode};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &TableConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, TicketError> {
        if event::poll(Duration::from_millis(self.event_poll_time))? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    return Ok(self.handle_key(model, key));
                }
                Event::Resize(width, height) => {
                    return Ok(Some(Message::Resize(width as usize, height as usize)));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    pub fn handle_key(&self, model: &Model, key: event::KeyEvent) -> Option<Message> {
        if model.raw_keyevents() {
            return Some(Message::RawKey(key));
        }
        let message = match model.modus() {
            Modus::TABLE => match key.code {
                KeyCode::Char('q') => Some(Message::Quit),
                KeyCode::Char('j') | KeyCode::Down => Some(Message::MoveDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::MoveUp),
                KeyCode::Char('g') | KeyCode::Home => Some(Message::MoveBeginning),
                KeyCode::Char('G') | KeyCode::End => Some(Message::MoveEnd),
                KeyCode::Char('/') => Some(Message::Search),
                KeyCode::Char('x') => Some(Message::ClearSearch),
                KeyCode::Char('s') => Some(Message::CycleStatus),
                KeyCode::Char('c') => Some(Message::Columns),
                KeyCode::Char('y') => Some(Message::CopyRow),
                KeyCode::Char('?') => Some(Message::Help),
                KeyCode::Char(d @ '1'..='9') => Self::sort_message(model, d),
                _ => None,
            },
            Modus::COLUMNS => match key.code {
                KeyCode::Char('q') => Some(Message::Quit),
                KeyCode::Char('j') | KeyCode::Down => Some(Message::PickerDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::PickerUp),
                KeyCode::Char(' ') | KeyCode::Enter => Some(Message::ToggleColumn),
                KeyCode::Backspace | KeyCode::Delete => Some(Message::ClearColumns),
                KeyCode::Esc | KeyCode::Char('c') => Some(Message::Exit),
                _ => None,
            },
            Modus::POPUP => match key.code {
                KeyCode::Char('q') => Some(Message::Quit),
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => Some(Message::Exit),
                _ => None,
            },
            Modus::SEARCH => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }

    /// Digit `n` sorts by the n-th rendered column.
    fn sort_message(model: &Model, digit: char) -> Option<Message> {
        let n = digit.to_digit(10)? as usize;
        let columns = crate::pipeline::visible_columns(model.columns().value());
        columns.get(n - 1).map(|&c| Message::SortBy(c))
    }
}
