use ratatui::{
    prelude::{Buffer, Rect, Widget},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tabula_list::FilterDescriptor;

/// One line listing every filter and its current value
pub struct FilterBar<'a> {
    pub filters: &'a [FilterDescriptor],
    pub focused: Option<usize>,
}

impl FilterBar<'_> {
    fn line(&self) -> Line<'static> {
        if self.filters.is_empty() {
            return Line::from(Span::styled(
                "No filters",
                Style::default().fg(Color::DarkGray),
            ));
        }

        let mut spans = vec![Span::raw("Filters: ")];
        for (idx, filter) in self.filters.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(
                    " │ ",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let mut style = Style::default();
            if filter.is_active() {
                style = style.fg(Color::Green);
            }
            if self.focused == Some(idx) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(
                format!("{}: {}", filter.name, filter.label()),
                style,
            ));
        }
        Line::from(spans)
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}
