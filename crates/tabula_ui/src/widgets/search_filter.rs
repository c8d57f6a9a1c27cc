use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::widgets::text_input::TextInput;

/// Search box shown above the list while a query is being typed or kept
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    input: TextInput,
    pub is_active: bool,
}

impl SearchFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.input.move_cursor_to_end();
    }

    /// Stops editing and keeps the query
    pub const fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Stops editing and drops the query
    pub fn cancel(&mut self) {
        self.is_active = false;
        self.input.clear();
    }

    pub fn add_char(&mut self, ch: char) {
        self.input.add_char(ch);
    }

    pub fn delete_char(&mut self) {
        self.input.delete_char();
    }

    pub const fn move_cursor_left(&mut self) {
        self.input.move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.input.move_cursor_right();
    }

    pub const fn move_cursor_to_start(&mut self) {
        self.input.move_cursor_to_start();
    }

    pub fn move_cursor_to_end(&mut self) {
        self.input.move_cursor_to_end();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Replaces the query, e.g. when the list was reset elsewhere
    pub fn set_query(&mut self, query: &str) {
        self.input.set_text(query);
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.input.text().trim()
    }

    /// Whether the box takes up room in the layout
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_active || !self.input.is_empty()
    }

    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.input.cursor_position()
    }
}

impl StatefulWidget for SearchFilter {
    type State = ();

    fn render(
        self,
        area: Rect,
        buf: &mut ratatui::buffer::Buffer,
        _state: &mut Self::State,
    ) {
        if !self.is_visible() {
            return;
        }

        let (title, border) = if self.is_active {
            (" Search (Enter to keep, Esc to clear) ", Color::Yellow)
        } else {
            (" Search (/ to edit) ", Color::DarkGray)
        };
        let block = Block::new()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title)
            .title_alignment(Alignment::Left);

        let inner_area = block.inner(area);
        Widget::render(block, area, buf);

        let (before, after) = self.input.split_at_cursor();
        let mut spans = vec![Span::raw(before)];
        if self.is_active {
            spans.push(Span::styled("█", Style::default().fg(Color::White)));
        }
        spans.push(Span::raw(after));

        Paragraph::new(Line::from(spans))
            .style(Style::default().fg(Color::White))
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;

    use super::*;

    fn typed(text: &str) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.activate();
        text.chars().for_each(|c| filter.add_char(c));
        filter
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(typed("  john ").query(), "john");
    }

    #[test]
    fn test_deactivate_keeps_and_cancel_clears() {
        let mut filter = typed("smith");
        filter.deactivate();
        assert!(!filter.is_active);
        assert!(filter.is_visible());
        assert_eq!(filter.query(), "smith");

        filter.activate();
        filter.cancel();
        assert!(!filter.is_visible());
        assert_eq!(filter.query(), "");
    }

    #[test]
    fn test_render_shows_query_and_cursor() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        typed("ann").render(area, &mut buf, &mut ());
        let line: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(line.starts_with("│ann█"), "{line:?}");
    }

    #[test]
    fn test_hidden_renders_nothing() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        SearchFilter::new().render(area, &mut buf, &mut ());
        assert_eq!(buf, Buffer::empty(area));
    }
}
