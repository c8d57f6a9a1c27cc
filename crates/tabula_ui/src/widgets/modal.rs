use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::{Alignment, Buffer, Constraint, Layout, Rect, Widget},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tabula_data::Sector;
use unicode_width::UnicodeWidthStr;

use crate::widgets::buttons::Buttons;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalType {
    RecordDetail,
    SectorPicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Close,
    SelectSector(Sector),
}

/// Centers a `width` x `height` box in `area`, shrinking it to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Every field of one record, opened from a row
#[derive(Default, Debug, Clone)]
pub struct RecordDetailModal {
    pub is_open: bool,
    pub title: String,
    pub fields: Vec<(String, String)>,
    scroll: u16,
}

impl RecordDetailModal {
    #[must_use]
    pub const fn new(title: String, fields: Vec<(String, String)>) -> Self {
        Self {
            is_open: true,
            title,
            fields,
            scroll: 0,
        }
    }

    pub const fn close(&mut self) {
        self.is_open = false;
    }

    #[must_use]
    pub const fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn handle_key_events(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.close(),
            KeyCode::Char('j') | KeyCode::Down => {
                let last = u16::try_from(self.fields.len().saturating_sub(1))
                    .unwrap_or(u16::MAX);
                self.scroll = self.scroll.saturating_add(1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn label_width(&self) -> usize {
        self.fields
            .iter()
            .map(|(label, _)| label.width())
            .max()
            .unwrap_or(0)
    }
}

impl Widget for RecordDetailModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_open {
            return;
        }

        let label_width = self.label_width();
        let content_width = self
            .fields
            .iter()
            .map(|(_, value)| label_width + 2 + value.width())
            .max()
            .unwrap_or(0)
            .max(self.title.width())
            + 4;
        let height = u16::try_from(self.fields.len()).unwrap_or(u16::MAX);
        let modal_area = centered(
            area,
            u16::try_from(content_width).unwrap_or(u16::MAX).clamp(40, 90),
            height.saturating_add(4),
        );

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black));
        Clear.render(modal_area, buf);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                .areas(inner);

        let lines = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{label:>label_width$}: "),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value.clone()),
                ])
            })
            .collect::<Vec<_>>();
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(body, buf);

        Buttons {
            actions: &[("Close", "Esc"), ("Scroll", "j/k")],
        }
        .render(footer, buf);
    }
}

/// Chooses the sector to browse
#[derive(Debug, Clone)]
pub struct SectorPickerModal {
    pub is_open: bool,
    selected: usize,
    picked: Option<Sector>,
}

impl SectorPickerModal {
    #[must_use]
    pub fn new(current: Sector) -> Self {
        Self {
            is_open: true,
            selected: Sector::ALL
                .iter()
                .position(|sector| *sector == current)
                .unwrap_or(0),
            picked: None,
        }
    }

    #[must_use]
    pub fn highlighted(&self) -> Sector {
        Sector::ALL.get(self.selected).copied().unwrap_or_default()
    }

    pub const fn close(&mut self) {
        self.is_open = false;
    }

    /// The sector confirmed with Enter, if any
    #[must_use]
    pub const fn picked(&self) -> Option<Sector> {
        self.picked
    }

    pub fn handle_key_events(&mut self, key: KeyEvent) {
        let count = Sector::ALL.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close(),
            KeyCode::Enter => {
                self.picked = Some(self.highlighted());
                self.close();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => self.selected = count - 1,
            _ => {}
        }
    }
}

impl Widget for SectorPickerModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_open {
            return;
        }

        let height = u16::try_from(Sector::ALL.len()).unwrap_or(u16::MAX);
        let modal_area = centered(area, 36, height.saturating_add(3));
        let block = Block::default()
            .title(" Sector ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .style(Style::default().bg(Color::Black));
        Clear.render(modal_area, buf);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);
        let [list, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                .areas(inner);

        let highlighted = self.highlighted();
        let lines = Sector::ALL
            .iter()
            .map(|sector| {
                if *sector == highlighted {
                    Line::from(format!("▶ {}", sector.title())).style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::from(format!("  {}", sector.title()))
                }
            })
            .collect::<Vec<_>>();
        Paragraph::new(lines).render(list, buf);

        Buttons {
            actions: &[("Open", "Enter"), ("Cancel", "Esc")],
        }
        .render(footer, buf);
    }
}

/// Owns whichever modal is on screen
#[derive(Default, Debug)]
pub struct ModalManager {
    record_modal: Option<RecordDetailModal>,
    sector_modal: Option<SectorPickerModal>,
    active_modal_type: Option<ModalType>,
}

impl ModalManager {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            record_modal: None,
            sector_modal: None,
            active_modal_type: None,
        }
    }

    #[must_use]
    pub fn is_any_modal_open(&self) -> bool {
        self.record_modal.as_ref().is_some_and(|m| m.is_open)
            || self.sector_modal.as_ref().is_some_and(|m| m.is_open)
    }

    #[must_use]
    pub const fn active_modal_type(&self) -> Option<ModalType> {
        self.active_modal_type
    }

    pub fn open_record_modal(
        &mut self,
        title: String,
        fields: Vec<(String, String)>,
    ) {
        self.record_modal = Some(RecordDetailModal::new(title, fields));
        self.active_modal_type = Some(ModalType::RecordDetail);
    }

    pub fn open_sector_modal(&mut self, current: Sector) {
        self.sector_modal = Some(SectorPickerModal::new(current));
        self.active_modal_type = Some(ModalType::SectorPicker);
    }

    pub fn close_active_modal(&mut self) {
        match self.active_modal_type {
            Some(ModalType::RecordDetail) => {
                if let Some(modal) = &mut self.record_modal {
                    modal.close();
                }
            }
            Some(ModalType::SectorPicker) => {
                if let Some(modal) = &mut self.sector_modal {
                    modal.close();
                }
            }
            None => {}
        }
        self.active_modal_type = None;
        self.cleanup_closed_modals();
    }

    /// Routes a key to the active modal and reports what it decided
    pub fn handle_key_events(&mut self, key: KeyEvent) -> ModalAction {
        let action = match self.active_modal_type {
            Some(ModalType::RecordDetail) => {
                self.record_modal.as_mut().map_or(ModalAction::None, |modal| {
                    modal.handle_key_events(key);
                    if modal.is_open {
                        ModalAction::None
                    } else {
                        ModalAction::Close
                    }
                })
            }
            Some(ModalType::SectorPicker) => {
                self.sector_modal.as_mut().map_or(ModalAction::None, |modal| {
                    modal.handle_key_events(key);
                    match (modal.is_open, modal.picked()) {
                        (true, _) => ModalAction::None,
                        (false, Some(sector)) => {
                            ModalAction::SelectSector(sector)
                        }
                        (false, None) => ModalAction::Close,
                    }
                })
            }
            None => ModalAction::None,
        };

        if action != ModalAction::None {
            self.active_modal_type = None;
            self.cleanup_closed_modals();
        }
        action
    }

    fn cleanup_closed_modals(&mut self) {
        if self.record_modal.as_ref().is_some_and(|m| !m.is_open) {
            self.record_modal = None;
        }
        if self.sector_modal.as_ref().is_some_and(|m| !m.is_open) {
            self.sector_modal = None;
        }
    }

    #[must_use]
    pub const fn get_record_modal(&self) -> Option<&RecordDetailModal> {
        self.record_modal.as_ref()
    }

    #[must_use]
    pub const fn get_sector_modal(&self) -> Option<&SectorPickerModal> {
        self.sector_modal.as_ref()
    }

    /// Draws the active modal over `area`
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        match self.active_modal_type {
            Some(ModalType::RecordDetail) => {
                if let Some(modal) = &self.record_modal {
                    modal.clone().render(area, buf);
                }
            }
            Some(ModalType::SectorPicker) => {
                if let Some(modal) = &self.sector_modal {
                    modal.clone().render(area, buf);
                }
            }
            None => {}
        }
    }
}
