use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, info, trace, warn};

use crate::domain::{HELP_TEXT, Message, TableConfig, TicketError};
use crate::inputter::{InputResult, Inputter};
use crate::multiselect::MultiSelect;
use crate::pipeline::{self, FilterState, Projection, SortState};
use crate::selection::{SelectOption, Selection};
use crate::ticket::{ColumnKey, Ticket};
use crate::ui::TABLE_CHROME_HEIGHT;

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modus {
    TABLE,
    SEARCH,
    COLUMNS,
    POPUP,
}

/// The column catalog offered by the column picker.
pub fn column_options() -> Vec<SelectOption> {
    ColumnKey::ALL
        .iter()
        .map(|c| SelectOption::new(c.key(), c.label()))
        .collect()
}

/// Page state of the dashboard.
///
/// Owns the committed filter, sort and column selection. The visible table is
/// never stored, it is recomputed by [`Model::projection`] on every read.
pub struct Model {
    tickets: Vec<Ticket>,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    filter: FilterState,
    sort: SortState,
    columns: MultiSelect,
    curser_row: usize,
    offset_row: usize,
    table_height: usize,
    input: Inputter,
    last_input: InputResult,
    search_backup: String,
    popup_message: String,
    status_message: String,
}

impl Model {
    pub fn init(config: &TableConfig, tickets: Vec<Ticket>, ui_height: usize) -> Self {
        let columns = MultiSelect::new(
            column_options(),
            Selection::from_keys(config.initial_columns.iter()),
        )
        .with_placeholder(&config.placeholder);

        let model = Self {
            tickets,
            status: Status::READY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            filter: FilterState::new(config.initial_status, &config.initial_search),
            sort: config.initial_sort,
            columns,
            curser_row: 0,
            offset_row: 0,
            table_height: ui_height.saturating_sub(TABLE_CHROME_HEIGHT).max(1),
            input: Inputter::default(),
            last_input: InputResult::default(),
            search_backup: String::new(),
            popup_message: String::new(),
            status_message: String::new(),
        };
        info!(
            "Dashboard ready with {} tickets, filter {:?}, sort {:?}",
            model.tickets.len(),
            model.filter,
            model.sort
        );
        model
    }

    // ------------------------------ Accessors ------------------------------ //

    pub fn projection(&self) -> Projection<'_> {
        pipeline::project(&self.tickets, &self.filter, &self.sort, self.columns.value())
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn columns(&self) -> &MultiSelect {
        &self.columns
    }

    pub fn modus(&self) -> Modus {
        self.modus
    }

    pub fn selected_row(&self) -> usize {
        self.curser_row
    }

    pub fn offset_row(&self) -> usize {
        self.offset_row
    }

    pub fn table_height(&self) -> usize {
        self.table_height
    }

    pub fn input(&self) -> &InputResult {
        &self.last_input
    }

    pub fn popup_message(&self) -> &str {
        &self.popup_message
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::SEARCH
    }

    // ------------------------------- Update -------------------------------- //

    pub fn update(&mut self, message: Message) -> Result<(), TicketError> {
        trace!("Update: Modus {:?}, Message {:?}", self.modus, message);
        match self.modus {
            Modus::TABLE => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_selection_up(1),
                Message::MoveDown => self.move_selection_down(1),
                Message::MoveBeginning => self.move_selection_beginning(),
                Message::MoveEnd => self.move_selection_end(),
                Message::Search => self.enter_search(),
                Message::ClearSearch => self.set_search_term(String::new()),
                Message::CycleStatus => self.cycle_status(),
                Message::Columns => self.open_column_picker(),
                Message::SortBy(column) => self.sort_by(column),
                Message::CopyRow => self.copy_row(),
                Message::Help => self.show_help(),
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
            Modus::SEARCH => match message {
                Message::RawKey(key) => self.raw_input(key),
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
            Modus::COLUMNS => match message {
                Message::Quit => self.quit(),
                Message::PickerUp => self.columns.highlight_prev(),
                Message::PickerDown => self.columns.highlight_next(),
                Message::ToggleColumn => self.toggle_column(),
                Message::ClearColumns => self.clear_columns(),
                Message::Exit => self.exit(),
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
            Modus::POPUP => match message {
                Message::Quit => self.quit(),
                Message::Exit => self.exit(),
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
        }
        Ok(())
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn exit(&mut self) {
        match self.modus {
            Modus::COLUMNS => {
                self.columns.set_open(false);
                self.modus = Modus::TABLE;
                self.previous_modus = Modus::COLUMNS;
            }
            Modus::POPUP => {
                trace!("Close popup ...");
                self.modus = self.previous_modus;
                self.previous_modus = Modus::POPUP;
                self.popup_message.clear();
            }
            Modus::TABLE | Modus::SEARCH => {}
        }
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.popup_message = HELP_TEXT.to_string();
    }

    fn ui_resize(&mut self, height: usize) {
        trace!("UI was resized! h:{}", height);
        self.table_height = height.saturating_sub(TABLE_CHROME_HEIGHT).max(1);
        self.clamp_selection();
    }

    // ------------------------------- Search -------------------------------- //

    fn enter_search(&mut self) {
        trace!("Entering search input ...");
        self.previous_modus = self.modus;
        self.modus = Modus::SEARCH;
        self.search_backup = self.filter.search_term.clone();
        self.input.set(&self.filter.search_term);
        self.last_input = self.input.get();
    }

    fn raw_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        if self.last_input.canceled {
            let backup = std::mem::take(&mut self.search_backup);
            self.set_search_term(backup);
        } else {
            // The table follows every keystroke.
            self.set_search_term(self.last_input.input.clone());
        }
        if self.last_input.finished {
            self.modus = self.previous_modus;
            self.previous_modus = Modus::SEARCH;
            self.input.clear();
            let found = self.projection().len();
            if self.filter.search_term.trim().is_empty() {
                self.set_status_message(format!("{found} tickets"));
            } else {
                self.set_status_message(format!(
                    "Found {found} tickets matching \"{}\"",
                    self.filter.search_term
                ));
            }
        }
    }

    fn set_search_term(&mut self, term: String) {
        self.filter.search_term = term;
        self.clamp_selection();
    }

    // ---------------------------- Status / sort ---------------------------- //

    fn cycle_status(&mut self) {
        self.filter.status = self.filter.status.next();
        debug!("Status filter {:?}", self.filter.status);
        self.set_status_message(format!("Status: {}", self.filter.status.label()));
        self.clamp_selection();
    }

    fn sort_by(&mut self, column: ColumnKey) {
        self.sort = self.sort.click(column);
        debug!("Sort {:?}", self.sort);
        self.set_status_message(format!(
            "Sorted by {} {:?}",
            column.label(),
            self.sort.direction
        ));
    }

    // ------------------------------- Columns ------------------------------- //

    fn open_column_picker(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::COLUMNS;
        self.columns.set_open(true);
    }

    fn toggle_column(&mut self) {
        self.columns.toggle_highlighted();
        self.clamp_selection();
    }

    fn clear_columns(&mut self) {
        self.columns.clear();
        self.clamp_selection();
    }

    // ------------------------------ Selection ------------------------------ //

    fn clamp_selection(&mut self) {
        let nrows = self.projection().len();
        if nrows == 0 {
            self.curser_row = 0;
            self.offset_row = 0;
            return;
        }
        self.curser_row = self.curser_row.min(nrows - 1);
        self.scroll_to_selection();
    }

    fn scroll_to_selection(&mut self) {
        if self.curser_row < self.offset_row {
            self.offset_row = self.curser_row;
        } else if self.curser_row >= self.offset_row + self.table_height {
            self.offset_row = self.curser_row + 1 - self.table_height;
        }
    }

    fn move_selection_up(&mut self, size: usize) {
        self.curser_row = self.curser_row.saturating_sub(size);
        self.scroll_to_selection();
    }

    fn move_selection_down(&mut self, size: usize) {
        let nrows = self.projection().len();
        if nrows > 0 {
            self.curser_row = std::cmp::min(self.curser_row + size, nrows - 1);
            self.scroll_to_selection();
        }
    }

    fn move_selection_beginning(&mut self) {
        self.curser_row = 0;
        self.offset_row = 0;
    }

    fn move_selection_end(&mut self) {
        let nrows = self.projection().len();
        self.curser_row = nrows.saturating_sub(1);
        self.scroll_to_selection();
    }

    // -------------------------------- Copy --------------------------------- //

    /// The visible cells of the selected row as one csv line.
    pub fn selected_row_as_csv(&self) -> Option<String> {
        let projection = self.projection();
        let row = projection.rows.get(self.curser_row)?;
        let content = row
            .cells
            .iter()
            .map(|c| wrap_cell_content(c))
            .collect::<Vec<String>>();
        Some(content.join(","))
    }

    fn copy_row(&mut self) {
        let Some(row_content) = self.selected_row_as_csv() else {
            self.set_status_message("Nothing to copy");
            return;
        };
        let result = Clipboard::new().and_then(|mut cb| cb.set_text(row_content));
        match result {
            Ok(_) => {
                trace!("Copied row content to clipboard.");
                self.set_status_message("Copied ticket to clipboard");
            }
            Err(e) => {
                warn!("Error copying to clipboard: {:?}", e);
                self.set_status_message("Clipboard not available");
            }
        }
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}

fn wrap_cell_content(c: &str) -> String {
    let needs_escaping = c.contains('"');
    let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',') || needs_escaping;
    let mut out = String::from(c);

    if needs_escaping {
        out = out.replace('"', "\"\"");
    }
    if needs_wrapping {
        out = format!("\"{out}\"");
    }
    out
}
