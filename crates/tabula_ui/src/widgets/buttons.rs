use ratatui::{
    prelude::{Buffer, Rect, Widget},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// A centered row of modal actions, each labelled with the key that
/// triggers it. The first action is the default one.
pub struct Buttons<'a> {
    pub actions: &'a [(&'a str, &'a str)],
}

impl Buttons<'_> {
    fn line(&self) -> Line<'static> {
        let spans = self
            .actions
            .iter()
            .enumerate()
            .flat_map(|(idx, (label, key))| {
                let style = if idx == 0 {
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White).bg(Color::DarkGray)
                };
                [
                    Span::styled(format!(" {label} "), style),
                    Span::styled(
                        format!(" {key}  "),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]
            })
            .collect::<Vec<_>>();
        Line::from(spans).centered()
    }
}

impl Widget for Buttons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}
