use std::fmt::Display;

use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy)]
pub struct Hotkey<'a> {
    pub keycode: KeyCode,
    pub description: &'a str,
}

impl Display for Hotkey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.keycode {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other}"),
        }
    }
}
