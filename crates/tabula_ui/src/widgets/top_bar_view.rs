use crossterm::event::KeyCode;
use ratatui::{
    prelude::{Alignment, Buffer, Constraint, Layout, Rect, Widget},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tabula_data::Sector;

use super::{hotkey::Hotkey, hotkey_view::HotkeyView};

const fn hotkey(keycode: KeyCode, description: &'static str) -> Hotkey<'static> {
    Hotkey {
        keycode,
        description,
    }
}

pub const LIST_HOTKEYS: [Hotkey; 12] = [
    hotkey(KeyCode::Char('/'), "Search"),
    hotkey(KeyCode::Char('s'), "Sort column"),
    hotkey(KeyCode::Char('f'), "Next filter"),
    hotkey(KeyCode::Char('v'), "Cycle filter"),
    hotkey(KeyCode::Char('x'), "Clear filters"),
    hotkey(KeyCode::Char(' '), "Select row"),
    hotkey(KeyCode::Char('a'), "Select page"),
    hotkey(KeyCode::Char('A'), "Select all"),
    hotkey(KeyCode::Char('c'), "Clear selection"),
    hotkey(KeyCode::Enter, "Open record"),
    hotkey(KeyCode::Char('+'), "Page size"),
    hotkey(KeyCode::Char('S'), "Sectors"),
];

pub struct TopBarView<'a> {
    pub sector: Sector,
    pub source: &'a str,
    pub total_records: usize,
    pub hotkeys: &'a [Hotkey<'a>],
    pub app_name: &'a str,
}

impl Widget for TopBarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [info, keys, name] = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(55),
            Constraint::Percentage(20),
        ])
        .spacing(1)
        .areas(area);

        let lines = vec![
            Line::from(Span::styled(
                self.sector.title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                " {}: {}",
                self.sector.entity(),
                self.total_records
            )),
            Line::from(format!(" Source: {}", self.source)),
            Line::from(" [ ] switch sector"),
        ];
        Paragraph::new(lines).render(info, buf);

        HotkeyView {
            hotkeys: self.hotkeys,
        }
        .render(keys, buf);

        Paragraph::new(self.app_name.trim_start_matches('\n'))
            .alignment(Alignment::Right)
            .render(name, buf);
    }
}
