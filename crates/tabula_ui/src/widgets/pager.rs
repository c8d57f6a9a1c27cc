use ratatui::{
    prelude::{Buffer, Constraint, Layout, Rect, Widget},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tabula_list::{PageMarker, Pagination};

/// Footer with the item range, the page window and the page size
pub struct Pager<'a> {
    pub pagination: &'a Pagination,
    pub window: &'a [PageMarker],
    pub page_size_options: &'a [usize],
}

impl Pager<'_> {
    fn links(&self) -> Line<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let arrow = |enabled: bool, text: &'static str| {
            if enabled {
                Span::raw(text)
            } else {
                Span::styled(text, dim)
            }
        };

        let mut spans = vec![arrow(self.pagination.has_previous(), "‹ Prev ")];
        for marker in self.window {
            let span = match *marker {
                PageMarker::Page(page)
                    if page == self.pagination.current_page =>
                {
                    Span::styled(
                        format!("[{page}]"),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                }
                PageMarker::Page(page) => Span::raw(format!(" {page} ")),
                PageMarker::Ellipsis => Span::styled(" … ", dim),
            };
            spans.push(span);
        }
        spans.push(arrow(self.pagination.has_next(), " Next ›"));
        Line::from(spans).centered()
    }

    fn page_size(&self) -> Line<'static> {
        let options = self
            .page_size_options
            .iter()
            .map(|size| {
                if *size == self.pagination.page_size {
                    format!("[{size}]")
                } else {
                    size.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Line::from(format!("Rows per page: {options}")).right_aligned()
    }
}

impl Widget for Pager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [summary, links, size] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Fill(1),
        ])
        .areas(area);

        Line::from(self.pagination.summary()).render(summary, buf);
        self.links().render(links, buf);
        self.page_size().render(size, buf);
    }
}
