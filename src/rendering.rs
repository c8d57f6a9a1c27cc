use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders},
};
use tabula_ui::{
    filter_bar::FilterBar,
    pager::Pager,
    table::ListTable,
    top_bar_view::TopBarView,
};

use crate::app::{APP_NAME, App};

/// Rows taken by the top bar: the sector summary is four lines tall
pub const TOPBAR_HEIGHT: u16 = 5;

impl App<'_> {
    /// Renders the user interface.
    ///
    /// Top to bottom: top bar, search box when in use, filter bar, the
    /// table, pager and status line. Modals are drawn over everything.
    pub fn render(&mut self, frame: &mut Frame) {
        let search_height = if self.search_filter.is_visible() { 3 } else { 0 };
        let [top, search, filters, body, pager, status] = Layout::vertical([
            Constraint::Length(TOPBAR_HEIGHT),
            Constraint::Length(search_height),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            TopBarView {
                sector: self.sector,
                source: self.source.name(),
                total_records: self.list.records().len(),
                hotkeys: &self.hotkeys,
                app_name: APP_NAME,
            },
            top,
        );

        if search_height > 0 {
            frame.render_stateful_widget(
                self.search_filter.clone(),
                search,
                &mut (),
            );
        }

        let page = self.list.view();

        frame.render_widget(
            FilterBar {
                filters: page.filters,
                focused: self.focused_filter,
            },
            filters,
        );

        let block = Block::new()
            .borders(Borders::ALL)
            .title(self.table_title(page.selected_total, page.selected_matching))
            .title_alignment(Alignment::Center);
        let inner = block.inner(body);
        frame.render_widget(block, body);
        frame.render_stateful_widget(
            ListTable::new(&page),
            inner,
            &mut self.table_state,
        );

        frame.render_widget(
            Pager {
                pagination: &page.pagination,
                window: &page.page_window,
                page_size_options: page.page_size_options,
            },
            pager,
        );

        frame.render_widget(self.status_line.clone(), status);

        if self.modal_manager.is_any_modal_open() {
            self.modal_manager.render(frame.area(), frame.buffer_mut());
        }
    }

    /// e.g. ` Employees · 3 selected (2 shown) `
    fn table_title(&self, selected: usize, matching: usize) -> String {
        let entity = self.sector.entity();
        match (selected, matching) {
            (0, _) => format!(" {entity} "),
            (selected, matching) if selected == matching => {
                format!(" {entity} · {selected} selected ")
            }
            (selected, matching) => {
                format!(" {entity} · {selected} selected ({matching} shown) ")
            }
        }
    }
}
