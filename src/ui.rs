use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};

use crate::model::{Modus, Model};
use crate::pipeline::SortIndicator;
use crate::ticket::ColumnKey;

pub const HEADER_HEIGHT: usize = 3;
pub const NOTICE_HEIGHT: usize = 3;
pub const TOOLBAR_HEIGHT: usize = 3;
pub const STATUSLINE_HEIGHT: usize = 1;
pub const TABLE_HEADER_HEIGHT: usize = 3; // Borders and the header row
/// Rows of the terminal that are not available for ticket rows.
pub const TABLE_CHROME_HEIGHT: usize =
    HEADER_HEIGHT + NOTICE_HEIGHT + TOOLBAR_HEIGHT + STATUSLINE_HEIGHT + TABLE_HEADER_HEIGHT;

pub const NOTICE_TEXT: &str = "This view shows Tickets created from PWI and sent to DIXA. \
The conversation happens between the PWI Partner account and DIXA Agent.";

const SEARCH_PLACEHOLDER: &str = "Search tickets...";

#[derive(Debug, Default)]
pub struct TableUI {
    table_state: TableState,
}

impl TableUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let [header, notice, toolbar, table, statusline] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT as u16),
            Constraint::Length(NOTICE_HEIGHT as u16),
            Constraint::Length(TOOLBAR_HEIGHT as u16),
            Constraint::Min(TABLE_HEADER_HEIGHT as u16),
            Constraint::Length(STATUSLINE_HEIGHT as u16),
        ])
        .areas(frame.area());

        self.draw_header(frame, header);
        self.draw_notice(frame, notice);
        self.draw_toolbar(model, frame, toolbar);
        self.draw_table(model, frame, table);
        self.draw_statusline(model, frame, statusline);

        match model.modus() {
            Modus::COLUMNS => self.draw_column_picker(model, frame),
            Modus::POPUP => self.draw_popup(model.popup_message(), frame),
            Modus::TABLE | Modus::SEARCH => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![" ✔ ".black().on_cyan(), " Partner Hub".bold()]);
        let block = Block::bordered().border_set(border::THICK);
        frame.render_widget(Paragraph::new(title).block(block), area);
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(Style::new().fg(Color::Cyan));
        let text = Line::from(vec![" ! ".bold().cyan(), NOTICE_TEXT.into()]);
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn draw_toolbar(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let [columns, search, status] = Layout::horizontal([
            Constraint::Length(28),
            Constraint::Min(20),
            Constraint::Length(18),
        ])
        .areas(area);

        let picker = model.columns();
        let mut spans = vec!["<C> ".blue().bold()];
        if picker.is_disabled() {
            spans.push(picker.display_text().dark_gray());
        } else {
            spans.push(picker.display_text().into());
        }
        if picker.can_clear() {
            spans.push(" ✕".dark_gray());
        }
        let columns_label = Line::from(spans);
        frame.render_widget(
            Paragraph::new(columns_label).block(Block::bordered().title(" Columns ")),
            columns,
        );

        let editing = model.modus() == Modus::SEARCH;
        let term = if editing {
            model.input().input.clone()
        } else {
            model.filter().search_term.clone()
        };
        let search_text = if term.is_empty() && !editing {
            Line::from(SEARCH_PLACEHOLDER.dark_gray())
        } else {
            Line::from(term)
        };
        let search_block = if editing {
            Block::bordered()
                .title(" Search ")
                .border_style(Style::new().fg(Color::Yellow))
        } else {
            Block::bordered().title(" Search </> ")
        };
        frame.render_widget(Paragraph::new(search_text).block(search_block), search);
        if editing {
            frame.set_cursor_position(search_cursor(search, model.input().curser_pos));
        }

        let status_label = Line::from(vec![
            model.filter().status.label().into(),
            " ▾".dark_gray(),
        ]);
        frame.render_widget(
            Paragraph::new(status_label).block(Block::bordered().title(" Status <S> ")),
            status,
        );
    }

    fn draw_table(&mut self, model: &Model, frame: &mut Frame, area: Rect) {
        let projection = model.projection();

        let header = Row::new(projection.columns.iter().enumerate().map(|(i, &c)| {
            Cell::from(format!("{} {} {}", i + 1, c.header(), sort_icon(model, c)))
        }))
        .style(Style::new().add_modifier(Modifier::BOLD));

        let begin = model.offset_row().min(projection.len());
        let end = std::cmp::min(begin + model.table_height(), projection.len());
        let rows = projection.rows[begin..end].iter().map(|r| {
            Row::new(
                projection
                    .columns
                    .iter()
                    .zip(r.cells.iter())
                    .map(|(&c, &value)| styled_cell(c, value)),
            )
        });

        let widths = projection.columns.iter().map(|&c| column_width(c));
        let title = Line::from(format!(" Tickets {}/{} ", projection.len(), model.tickets().len()));
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().title(title))
            .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED));

        if projection.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state
                .select(Some(model.selected_row().saturating_sub(begin)));
        }
        *self.table_state.offset_mut() = 0;
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_statusline(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::from(model.status_message().to_string()),
            "  ".into(),
            "<?>".blue().bold(),
            " help ".into(),
            "<Q>".blue().bold(),
            " quit".into(),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_column_picker(&self, model: &Model, frame: &mut Frame) {
        let picker = model.columns();
        let height = picker.options().len() as u16 + 2;
        let area = centered_rect(frame.area(), 36, height);

        let items: Vec<ListItem> = picker
            .options()
            .iter()
            .map(|o| {
                let check = if picker.is_checked(o) { "[x] " } else { "[ ] " };
                ListItem::new(format!("{check}{}", o.label))
            })
            .collect();
        let title = Line::from(format!(" {} ", picker.display_text()));
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(title)
                    .title_bottom(Line::from(" <Space> toggle <BS> clear <Esc> close ").centered()),
            )
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default().with_selected(Some(picker.highlighted()));
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_popup(&self, message: &str, frame: &mut Frame) {
        let height = message.lines().count() as u16 + 2;
        let area = centered_rect(frame.area(), 60, height);
        let popup = Paragraph::new(message.to_string())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(" Help ")
                    .title_bottom(Line::from(" <Esc> close ").centered())
                    .border_set(border::THICK),
            );
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn sort_icon(model: &Model, column: ColumnKey) -> &'static str {
    match model.sort().indicator(column) {
        SortIndicator::Unsorted => "↕",
        SortIndicator::Ascending => "▲",
        SortIndicator::Descending => "▼",
    }
}

fn styled_cell(column: ColumnKey, value: &str) -> Cell<'static> {
    let cell = Cell::from(value.to_string());
    if column != ColumnKey::Status {
        return cell;
    }
    let style = match value {
        "Closed" => Style::new().fg(Color::Black).bg(Color::LightGreen),
        "Open" => Style::new().fg(Color::Black).bg(Color::LightYellow),
        _ => Style::new().fg(Color::Black).bg(Color::Gray),
    };
    cell.style(style.add_modifier(Modifier::BOLD))
}

fn column_width(column: ColumnKey) -> Constraint {
    match column {
        ColumnKey::Id => Constraint::Length(14),
        ColumnKey::Subject => Constraint::Fill(2),
        ColumnKey::ImpactedAccount => Constraint::Fill(1),
        ColumnKey::Category => Constraint::Length(12),
        ColumnKey::Subcategory => Constraint::Fill(1),
        ColumnKey::Created => Constraint::Length(16),
        ColumnKey::Status => Constraint::Length(12),
    }
}

/// Cursor inside the bordered search box, kept within its right border.
fn search_cursor(area: Rect, curser_pos: usize) -> Position {
    let offset = u16::try_from(curser_pos).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(offset);
    Position::new(
        x.min(area.right().saturating_sub(2)),
        area.y.saturating_add(1),
    )
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
