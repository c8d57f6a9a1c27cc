use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Paragraph, Widget},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusLevel {
    #[default]
    Info,
    Error,
}

/// One line of feedback at the bottom of the screen
#[derive(Clone, Debug, Default)]
pub struct StatusLine {
    message: String,
    level: StatusLevel,
}

impl StatusLine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: String::new(),
            level: StatusLevel::Info,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.level = StatusLevel::Info;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.level = StatusLevel::Error;
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    pub fn clear(&mut self) {
        self.message.clear();
        self.level = StatusLevel::Info;
    }
}

impl Widget for StatusLine {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let style = match self.level {
            StatusLevel::Info => Style::default(),
            StatusLevel::Error => Style::default().fg(Color::Red),
        };

        Paragraph::new(self.message.as_str())
            .style(style)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .render(area, buf);
    }
}
