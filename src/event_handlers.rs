use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tabula_ui::{ListNavigation, handle_search_filter_input, modal::ModalAction};
use tracing::debug;

use crate::app::{App, TICK};

impl App<'_> {
    /// Waits up to one tick for a terminal event and applies it.
    ///
    /// Polling instead of blocking lets the main loop pick up finished
    /// loads while the user is idle.
    pub fn handle_crossterm_events(&mut self) -> Result<()> {
        if !event::poll(TICK)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.on_key_event(key);
            }
            // Resizes are picked up by the next draw
            Event::Key(_)
            | Event::FocusGained
            | Event::FocusLost
            | Event::Mouse(_)
            | Event::Paste(_)
            | Event::Resize(_, _) => {}
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.quit();
            return;
        }

        if self.modal_manager.is_any_modal_open() {
            self.handle_modal_events(key);
            return;
        }

        if self.search_filter.is_active {
            let mut changed = false;
            let handled = handle_search_filter_input(
                key,
                &mut self.search_filter,
                &mut |_| changed = true,
            );
            if changed {
                self.apply_search();
            }
            if handled {
                return;
            }
        }

        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q')) => self.quit(),
            (_, KeyCode::Esc) => {
                if self.search_filter.is_visible() {
                    self.clear_search();
                }
            }
            (_, KeyCode::Char('j') | KeyCode::Down) => self.move_down(key.code),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.move_up(key.code),
            (_, KeyCode::Home | KeyCode::End) => {
                let rows = self.list.visible().len();
                ListNavigation::navigate_rows(&mut self.table_state, rows, key.code);
            }
            (_, KeyCode::Char('h') | KeyCode::Left) => {
                self.list.previous_page();
                self.clamp_cursor();
            }
            (_, KeyCode::Char('l') | KeyCode::Right) => {
                self.list.next_page();
                self.clamp_cursor();
            }
            (_, KeyCode::Char('g')) => {
                self.list.first_page();
                self.clamp_cursor();
            }
            (_, KeyCode::Char('G')) => {
                self.list.last_page();
                self.clamp_cursor();
            }
            (_, KeyCode::Char('/')) => self.search_filter.activate(),
            (_, KeyCode::Tab) => ListNavigation::cycle_column(
                &mut self.table_state,
                self.list.columns().len(),
                true,
            ),
            (_, KeyCode::BackTab) => ListNavigation::cycle_column(
                &mut self.table_state,
                self.list.columns().len(),
                false,
            ),
            (_, KeyCode::Char('s')) => self.sort_by_focused_column(),
            (_, KeyCode::Char('f')) => self.focus_next_filter(),
            (_, KeyCode::Char('v')) => self.cycle_focused_filter(),
            (_, KeyCode::Char('x')) => self.clear_filters(),
            (_, KeyCode::Char(' ')) => {
                if let Some(id) = self.focused_id() {
                    self.list.toggle_selection(&id);
                }
            }
            (_, KeyCode::Char('a')) => self.list.select_all_visible(),
            (_, KeyCode::Char('A')) => self.list.select_all_matching(),
            (_, KeyCode::Char('c')) => self.list.clear_selection(),
            (_, KeyCode::Enter) => {
                if let Some(row) = self.table_state.selected_row() {
                    self.list.activate_row(row);
                }
            }
            (_, KeyCode::Char('+' | '=')) => self.cycle_page_size(true),
            (_, KeyCode::Char('-')) => self.cycle_page_size(false),
            (_, KeyCode::Char(']')) => self.switch_sector(self.sector.next()),
            (_, KeyCode::Char('[')) => {
                self.switch_sector(self.sector.previous());
            }
            (_, KeyCode::Char('S')) => {
                self.modal_manager.open_sector_modal(self.sector);
            }
            _ => {}
        }
    }

    fn handle_modal_events(&mut self, key: KeyEvent) {
        match self.modal_manager.handle_key_events(key) {
            ModalAction::SelectSector(sector) => self.switch_sector(sector),
            ModalAction::Close | ModalAction::None => {}
        }
    }

    /// Next row, turning to the next page past the last row
    fn move_down(&mut self, code: KeyCode) {
        let rows = self.list.visible().len();
        let on_last_row = self
            .table_state
            .selected_row()
            .is_some_and(|row| row + 1 >= rows);
        if on_last_row && self.list.pagination().has_next() {
            self.list.next_page();
            self.table_state.table.select(Some(0));
            self.clamp_cursor();
        } else {
            ListNavigation::navigate_rows(&mut self.table_state, rows, code);
        }
    }

    /// Previous row, turning to the previous page above the first row
    fn move_up(&mut self, code: KeyCode) {
        let rows = self.list.visible().len();
        let on_first_row = self.table_state.selected_row().is_none_or(|row| row == 0);
        if on_first_row && self.list.pagination().has_previous() {
            self.list.previous_page();
            let rows = self.list.visible().len();
            self.table_state.table.select(rows.checked_sub(1));
        } else {
            ListNavigation::navigate_rows(&mut self.table_state, rows, code);
        }
    }

    /// Identifier of the record under the row cursor
    fn focused_id(&self) -> Option<String> {
        let row = self.table_state.selected_row()?;
        self.list.visible_ids().into_iter().nth(row)
    }

    fn sort_by_focused_column(&mut self) {
        let Some(column) = self
            .table_state
            .selected_column()
            .and_then(|idx| self.list.columns().at(idx))
        else {
            return;
        };
        if !column.sortable {
            let message = format!("{} is not sortable", column.header);
            self.status_line.set_message(message);
            return;
        }

        let key = column.key.clone();
        let header = column.header.clone();
        self.list.toggle_sort(&key);
        if let Some(spec) = self.list.sort_spec() {
            debug!(column = %key, direction = ?spec.direction, "sorted");
            self.status_line.set_message(format!(
                "Sorted by {header} {}",
                spec.direction.indicator()
            ));
        }
    }

    /// Steps through the page size options and remembers the choice
    fn cycle_page_size(&mut self, forward: bool) {
        self.list.cycle_page_size(forward);
        if self.list.page_size() == self.page_size {
            return;
        }
        self.page_size = self.list.page_size();
        self.status_line
            .set_message(format!("{} rows per page", self.page_size));
        self.clamp_cursor();
        self.save_session();
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use tabula_data::Sector;
    use tabula_list::SortDirection;
    use tabula_ui::modal::ModalType;

    use super::*;
    use crate::app::tests::{loaded_app, settle};

    fn press(app: &mut App<'_>, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
        app.drain_events();
    }

    fn type_text(app: &mut App<'_>, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[tokio::test]
    async fn test_rows_turn_pages_at_the_edges() {
        let mut app = loaded_app(Sector::Hr).await;
        for _ in 0..9 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.table_state.selected_row(), Some(9));
        assert_eq!(app.list.current_page(), 1);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.list.current_page(), 2);
        assert_eq!(app.table_state.selected_row(), Some(0));
        assert_eq!(app.status_line.message(), "Page 2 of 3");

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.list.current_page(), 1);
        assert_eq!(app.table_state.selected_row(), Some(9));
    }

    #[tokio::test]
    async fn test_last_page_clamps_the_cursor() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::End);
        assert_eq!(app.table_state.selected_row(), Some(9));
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.list.current_page(), 3);
        assert_eq!(app.table_state.selected_row(), Some(3));
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.list.current_page(), 1);
    }

    #[tokio::test]
    async fn test_typed_search_applies_while_typing() {
        let mut app = loaded_app(Sector::Hr).await;
        app.running = true;
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_filter.is_active);
        type_text(&mut app, "EMP-00");
        assert_eq!(app.list.search(), "EMP-00");
        assert_eq!(app.list.matching().len(), 9);

        press(&mut app, KeyCode::Enter);
        assert!(!app.search_filter.is_active);
        assert_eq!(app.list.search(), "EMP-00");

        // keys act on the list again once the box is closed
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_escape_clears_the_search() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        assert!(app.list.matching().is_empty());
        press(&mut app, KeyCode::Esc);
        assert!(!app.search_filter.is_active);
        assert_eq!(app.list.matching().len(), 24);
    }

    #[tokio::test]
    async fn test_sort_follows_the_focused_column() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('s'));
        let spec = app.list.sort_spec().cloned().unwrap();
        assert_eq!(spec.key, "name");
        assert_eq!(spec.direction, SortDirection::Ascending);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(
            app.list.sort_spec().map(|spec| spec.direction),
            Some(SortDirection::Descending)
        );

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.status_line.message(), "Email is not sortable");
        assert_eq!(app.list.sort_spec().map(|spec| spec.key.as_str()), Some("name"));
    }

    #[tokio::test]
    async fn test_selection_keys() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::Char(' '));
        assert!(app.list.selection().is_selected("EMP-001"));
        assert!(app.status_line.message().starts_with("1 selected"));

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.list.selection().len(), 10);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.list.selection().len(), 1);

        press(&mut app, KeyCode::Char('A'));
        assert_eq!(app.list.selection().len(), 24);
        press(&mut app, KeyCode::Char('c'));
        assert!(app.list.selection().is_empty());
    }

    #[tokio::test]
    async fn test_enter_opens_and_escape_closes_the_record() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.modal_manager.active_modal_type(),
            Some(ModalType::RecordDetail)
        );
        assert!(
            app.modal_manager
                .get_record_modal()
                .is_some_and(|m| m.title.starts_with("EMP-002"))
        );

        // the list ignores keys while the modal is up
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.table_state.selected_row(), Some(1));

        press(&mut app, KeyCode::Esc);
        assert!(!app.modal_manager.is_any_modal_open());
    }

    #[tokio::test]
    async fn test_page_size_keys_cycle_options() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.list.page_size(), 25);
        assert_eq!(app.page_size, 25);
        assert_eq!(app.list.current_page(), 1);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.page_size, 10);
    }

    #[tokio::test]
    async fn test_sector_keys_reload_the_list() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::Char('A'));
        press(&mut app, KeyCode::Char(']'));
        assert!(app.list.is_loading());
        settle(&mut app).await;
        assert_eq!(app.sector, Sector::Crm);
        assert!(app.list.selection().is_empty());
        assert_eq!(app.list.records().len(), 24);

        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        settle(&mut app).await;
        assert_eq!(app.sector, Sector::Logistics);
    }

    #[tokio::test]
    async fn test_cursor_returns_to_top_after_reload() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::End);
        assert_eq!(app.table_state.selected_row(), Some(9));

        press(&mut app, KeyCode::Char(']'));
        terminal.draw(|frame| app.render(frame)).unwrap();
        settle(&mut app).await;
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert_eq!(app.table_state.selected_row(), Some(0));

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.table_state.selected_row(), Some(1));
        assert_eq!(app.list.current_page(), 1);
    }

    #[tokio::test]
    async fn test_sector_picker_switches_sector() {
        let mut app = loaded_app(Sector::Hr).await;
        press(&mut app, KeyCode::Char('S'));
        assert_eq!(
            app.modal_manager.active_modal_type(),
            Some(ModalType::SectorPicker)
        );
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;
        assert_eq!(app.sector, Sector::Accounting);
        assert!(!app.modal_manager.is_any_modal_open());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_the_search_box() {
        let mut app = loaded_app(Sector::Hr).await;
        app.running = true;
        press(&mut app, KeyCode::Char('/'));
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
