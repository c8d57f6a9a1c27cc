use crossterm::event::KeyCode;

use crate::widgets::table::ListTableState;

/// Cursor movement inside the rows and columns of the current page
pub struct ListNavigation;

impl ListNavigation {
    /// Keeps the row cursor on one of `row_count` rows
    pub fn clamp_rows(state: &mut ListTableState, row_count: usize) {
        match state.table.selected() {
            _ if row_count == 0 => state.table.select(None),
            Some(selected) if selected >= row_count => {
                state.table.select(Some(row_count - 1));
            }
            Some(_) => {}
            None => state.table.select(Some(0)),
        }
    }

    /// Keeps the column cursor on one of `column_count` data columns
    pub fn clamp_columns(state: &mut ListTableState, column_count: usize) {
        if column_count == 0 {
            state.table.select_column(None);
            state.column_offset = 0;
            return;
        }
        let last = column_count - 1;
        let selected = state.table.selected_column().unwrap_or(0).min(last);
        state.table.select_column(Some(selected));
        state.column_offset = state.column_offset.min(last);
    }

    /// Moves the column cursor, wrapping at both ends
    pub fn cycle_column(
        state: &mut ListTableState,
        column_count: usize,
        forward: bool,
    ) {
        if column_count == 0 {
            return;
        }
        let current = state.table.selected_column().unwrap_or(0);
        let next = if forward {
            (current + 1) % column_count
        } else {
            (current + column_count - 1) % column_count
        };
        state.table.select_column(Some(next));
    }

    /// Row movement keys. Returns whether the key was one of them.
    pub fn navigate_rows(
        state: &mut ListTableState,
        row_count: usize,
        key: KeyCode,
    ) -> bool {
        match key {
            KeyCode::Char('j') | KeyCode::Down => state.table.select_next(),
            KeyCode::Char('k') | KeyCode::Up => state.table.select_previous(),
            KeyCode::Home => state.table.select_first(),
            KeyCode::End => state.table.select(row_count.checked_sub(1)),
            _ => return false,
        }
        Self::clamp_rows(state, row_count);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_movement_stays_on_page() {
        let mut state = ListTableState::new();
        assert!(ListNavigation::navigate_rows(&mut state, 3, KeyCode::Char('k')));
        assert_eq!(state.selected_row(), Some(0));
        for _ in 0..5 {
            ListNavigation::navigate_rows(&mut state, 3, KeyCode::Down);
        }
        assert_eq!(state.selected_row(), Some(2));
        assert!(ListNavigation::navigate_rows(&mut state, 3, KeyCode::Home));
        assert_eq!(state.selected_row(), Some(0));
        assert!(ListNavigation::navigate_rows(&mut state, 3, KeyCode::End));
        assert_eq!(state.selected_row(), Some(2));
        assert!(!ListNavigation::navigate_rows(&mut state, 3, KeyCode::Char('x')));
    }

    #[test]
    fn test_clamp_rows_after_page_shrinks() {
        let mut state = ListTableState::new();
        state.table.select(Some(9));
        ListNavigation::clamp_rows(&mut state, 3);
        assert_eq!(state.selected_row(), Some(2));
        ListNavigation::clamp_rows(&mut state, 0);
        assert_eq!(state.selected_row(), None);
        ListNavigation::clamp_rows(&mut state, 4);
        assert_eq!(state.selected_row(), Some(0));
    }

    #[test]
    fn test_columns_wrap_and_clamp() {
        let mut state = ListTableState::new();
        ListNavigation::cycle_column(&mut state, 3, false);
        assert_eq!(state.selected_column(), Some(2));
        ListNavigation::cycle_column(&mut state, 3, true);
        assert_eq!(state.selected_column(), Some(0));

        state.table.select_column(Some(7));
        state.column_offset = 7;
        ListNavigation::clamp_columns(&mut state, 4);
        assert_eq!(state.selected_column(), Some(3));
        assert_eq!(state.column_offset, 3);
    }
}
