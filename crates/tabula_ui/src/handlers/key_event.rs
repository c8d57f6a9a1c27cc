use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::widgets::search_filter::SearchFilter;

/// Shared editing keys for single-line inputs. Evaluates to whether the
/// key was consumed.
macro_rules! handle_text_input {
    ($key:expr, $widget:expr, $on_change:block, $on_enter:block, $on_esc:block) => {{
        match ($key.modifiers, $key.code) {
            (_, KeyCode::Enter) => {
                $on_enter;
                true
            }
            (_, KeyCode::Esc) => {
                $on_esc;
                true
            }
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                $widget.move_cursor_to_start();
                true
            }
            (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
                $widget.move_cursor_to_end();
                true
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                $widget.clear();
                $on_change;
                true
            }
            (KeyModifiers::CONTROL, _) => false,
            (_, KeyCode::Char(ch)) if !ch.is_control() => {
                $widget.add_char(ch);
                $on_change;
                true
            }
            (_, KeyCode::Backspace) => {
                $widget.delete_char();
                $on_change;
                true
            }
            (_, KeyCode::Left) => {
                $widget.move_cursor_left();
                true
            }
            (_, KeyCode::Right) => {
                $widget.move_cursor_right();
                true
            }
            (_, KeyCode::Home) => {
                $widget.move_cursor_to_start();
                true
            }
            (_, KeyCode::End) => {
                $widget.move_cursor_to_end();
                true
            }
            _ => false,
        }
    }};
}

/// Handles keys while the search box is being edited. `on_query_change`
/// runs whenever the query text changes, including when Esc clears it.
pub fn handle_search_filter_input(
    key: KeyEvent,
    search_filter: &mut SearchFilter,
    on_query_change: &mut dyn FnMut(&str),
) -> bool {
    handle_text_input!(
        key,
        search_filter,
        {
            on_query_change(search_filter.query());
        },
        {
            search_filter.deactivate();
        },
        {
            search_filter.cancel();
            on_query_change(search_filter.query());
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn feed(filter: &mut SearchFilter, keys: &[KeyEvent]) -> Vec<String> {
        let mut seen = Vec::new();
        for key in keys {
            handle_search_filter_input(*key, filter, &mut |q| {
                seen.push(q.to_string());
            });
        }
        seen
    }

    #[test]
    fn test_typing_reports_each_query() {
        let mut filter = SearchFilter::new();
        filter.activate();
        let seen = feed(
            &mut filter,
            &[
                press(KeyCode::Char('j')),
                press(KeyCode::Char('o')),
                press(KeyCode::Backspace),
                press(KeyCode::Left),
            ],
        );
        assert_eq!(seen, ["j", "jo", "j"]);
    }

    #[test]
    fn test_enter_keeps_query_and_esc_clears() {
        let mut filter = SearchFilter::new();
        filter.activate();
        feed(&mut filter, &[press(KeyCode::Char('x')), press(KeyCode::Enter)]);
        assert!(!filter.is_active);
        assert_eq!(filter.query(), "x");

        filter.activate();
        let seen = feed(&mut filter, &[press(KeyCode::Esc)]);
        assert_eq!(seen, [""]);
        assert!(!filter.is_visible());
    }

    #[test]
    fn test_ctrl_u_clears_and_other_ctrl_keys_pass_through() {
        let mut filter = SearchFilter::new();
        filter.activate();
        feed(&mut filter, &[press(KeyCode::Char('a'))]);
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        let mut changed = false;
        assert!(!handle_search_filter_input(ctrl('c'), &mut filter, &mut |_| {
            changed = true;
        }));
        assert!(!changed);
        assert!(handle_search_filter_input(ctrl('u'), &mut filter, &mut |_| {
            changed = true;
        }));
        assert!(changed);
        assert_eq!(filter.query(), "");
    }
}
