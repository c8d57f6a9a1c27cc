use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{
        Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table,
        TableState, Widget,
    },
};
use tabula_list::{HeaderCell, ListPage};

use crate::widgets::column_widths;

const CHECKBOX_WIDTH: u16 = 3;

/// Cursor and horizontal scroll of the list table. The selected column
/// indexes data columns, the checkbox column is not counted.
#[derive(Clone, Debug, Default)]
pub struct ListTableState {
    pub table: TableState,
    pub column_offset: usize,
}

impl ListTableState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: TableState::default().with_selected(0).with_selected_column(0),
            column_offset: 0,
        }
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<usize> {
        self.table.selected()
    }

    #[must_use]
    pub fn selected_column(&self) -> Option<usize> {
        self.table.selected_column()
    }
}

/// Renders one [`ListPage`] as a table with a checkbox column
pub struct ListTable<'a, R> {
    page: &'a ListPage<'a, R>,
    empty_message: &'a str,
}

impl<'a, R> ListTable<'a, R> {
    #[must_use]
    pub const fn new(page: &'a ListPage<'a, R>) -> Self {
        Self {
            page,
            empty_message: "No records match the current search and filters",
        }
    }

    #[must_use]
    pub const fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }
}

fn header_label(header: &HeaderCell) -> String {
    let indicator = header.indicator();
    if indicator.is_empty() {
        header.header.clone()
    } else {
        format!("{} {indicator}", header.header)
    }
}

const fn checkbox(checked: bool, partial: bool) -> &'static str {
    if checked {
        "[x]"
    } else if partial {
        "[-]"
    } else {
        "[ ]"
    }
}

/// Data columns that fit into `area_width` starting at `column_offset`,
/// moving the offset when needed so `selected` stays on screen.
/// Returns the visible indices and the selected column's position among
/// them.
fn visible_columns(
    widths: &[u16],
    column_offset: usize,
    selected: Option<usize>,
    area_width: u16,
) -> (Vec<usize>, Option<usize>) {
    if widths.is_empty() {
        return (Vec::new(), None);
    }

    let fitting_from = |offset: usize| {
        let mut cumulative = 0u16;
        let mut cols = Vec::new();
        for (idx, &len) in widths.iter().enumerate().skip(offset) {
            let col_width = len.saturating_add(1);
            if cumulative.saturating_add(col_width) > area_width {
                break;
            }
            cumulative += col_width;
            cols.push(idx);
        }
        if cols.is_empty() {
            cols.push(offset.min(widths.len() - 1));
        }
        cols
    };

    let mut offset = column_offset.min(widths.len() - 1);
    if let Some(selected) = selected {
        if selected < offset {
            offset = selected;
        } else if !fitting_from(offset).contains(&selected) {
            offset = selected.min(widths.len() - 1);
        }
    }

    let cols = fitting_from(offset);
    let relative =
        selected.and_then(|selected| cols.iter().position(|&i| i == selected));
    (cols, relative)
}

impl<R> StatefulWidget for ListTable<'_, R> {
    type State = ListTableState;

    fn render(
        self,
        area: Rect,
        buf: &mut ratatui::buffer::Buffer,
        state: &mut Self::State,
    ) {
        let page = self.page;
        let headers: Vec<String> = page.headers.iter().map(header_label).collect();
        let widths = column_widths(&headers, page.rows.iter().map(|r| &r.cells));

        let data_width = area
            .width
            .saturating_sub(CHECKBOX_WIDTH + 1)
            .saturating_sub(HIGHLIGHT_SYMBOL_WIDTH);
        let (visible, relative_selected) = visible_columns(
            &widths,
            state.column_offset,
            state.table.selected_column(),
            data_width,
        );
        if let Some(&first) = visible.first() {
            state.column_offset = first;
        }

        let some_selected = page.rows.iter().any(|row| row.selected);
        let header = std::iter::once(Cell::from(checkbox(
            page.all_visible_selected,
            some_selected,
        )))
        .chain(visible.iter().map(|&idx| {
            Cell::from(headers.get(idx).cloned().unwrap_or_default())
        }))
        .collect::<Row>()
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1);

        let rows = page.rows.iter().map(|row| {
            let style = if row.selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            std::iter::once(Cell::from(checkbox(row.selected, false)))
                .chain(visible.iter().map(|&idx| {
                    Cell::from(row.cells.get(idx).cloned().unwrap_or_default())
                }))
                .collect::<Row>()
                .style(style)
                .height(1)
        });

        let constraints = std::iter::once(Constraint::Length(CHECKBOX_WIDTH))
            .chain(visible.iter().map(|&idx| {
                Constraint::Length(widths.get(idx).copied().unwrap_or(0))
            }))
            .collect::<Vec<_>>();

        let original_col = state.table.selected_column();
        state.table.select_column(relative_selected.map(|col| col + 1));
        if let Some(last) = page.rows.len().checked_sub(1) {
            let row = state.table.selected().map_or(0, |row| row.min(last));
            state.table.select(Some(row));
        }

        let (row_style, col_style, cell_style, symbol, spacing) =
            create_table_styles();
        let table = Table::new(rows, constraints)
            .header(header)
            .column_spacing(1)
            .flex(Flex::Start)
            .row_highlight_style(row_style)
            .column_highlight_style(col_style)
            .cell_highlight_style(cell_style)
            .highlight_symbol(symbol)
            .highlight_spacing(spacing);

        StatefulWidget::render(table, area, buf, &mut state.table);
        state.table.select_column(original_col);

        let message = if page.loading {
            Some("Loading records…")
        } else if page.is_empty() {
            Some(self.empty_message)
        } else {
            None
        };
        if let Some(message) = message {
            let [_, body] = Layout::vertical([
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .areas(area);
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(body, buf);
        }
    }
}

const HIGHLIGHT_SYMBOL: &str = " █ ";
const HIGHLIGHT_SYMBOL_WIDTH: u16 = 3;

fn create_table_styles()
-> (Style, Style, Style, Text<'static>, HighlightSpacing) {
    let selected_row_style = Style::default()
        .add_modifier(Modifier::REVERSED | Modifier::BOLD)
        .fg(Color::Black)
        .bg(Color::Yellow);
    let selected_col_style = Style::default().fg(Color::Cyan);
    let selected_cell_style = Style::default()
        .add_modifier(Modifier::REVERSED)
        .fg(Color::Magenta);
    (
        selected_row_style,
        selected_col_style,
        selected_cell_style,
        Text::from(HIGHLIGHT_SYMBOL),
        HighlightSpacing::Always,
    )
}
