/// Single-line text input with a cursor counted in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor_position: usize,
}

impl TextInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `TextInput` with initial text and cursor at the end
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor_position = text.chars().count();
        Self {
            text,
            cursor_position,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor_position = self.len();
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.text.len(), |(idx, _)| idx)
    }

    /// Text before and after the cursor
    #[must_use]
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_index())
    }

    pub fn add_char(&mut self, ch: char) {
        let idx = self.byte_index();
        self.text.insert(idx, ch);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let idx = self.byte_index();
        self.text.remove(idx);
    }

    pub const fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.len() {
            self.cursor_position += 1;
        }
    }

    pub const fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }
}
