use ratatui::{
    prelude::{Buffer, Rect, Widget},
    style::{Color, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::hotkey::Hotkey;

/// Lays hotkeys out top to bottom, then in further columns
pub struct HotkeyView<'a> {
    pub hotkeys: &'a [Hotkey<'a>],
}

impl HotkeyView<'_> {
    fn column_width(&self) -> u16 {
        let widest = self
            .hotkeys
            .iter()
            .map(|hotkey| {
                hotkey.to_string().width() + hotkey.description.width() + 4
            })
            .max()
            .unwrap_or(0);
        u16::try_from(widest).unwrap_or(u16::MAX)
    }
}

impl Widget for HotkeyView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let column_width = self.column_width();
        let mut x = area.x;
        let mut y = area.y;
        let max_y = area.y.saturating_add(area.height);
        let max_x = area.x.saturating_add(area.width);

        for hotkey in self.hotkeys {
            if y >= max_y {
                x = x.saturating_add(column_width);
                y = area.y;
            }
            if x >= max_x {
                break;
            }

            let width = column_width.min(max_x - x);
            Line::from(vec![
                Span::styled(
                    format!("<{hotkey}>"),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(" {}", hotkey.description)),
            ])
            .render(Rect::new(x, y, width, 1), buf);

            y += 1;
        }
    }
}
