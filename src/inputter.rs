use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

/// Single line text entry used for search boxes, prompts and form fields.
/// The cursor counts characters, not bytes.
#[derive(Default, Debug, Clone)]
pub struct Inputter {
    text: String,
    cursor: usize,
    max_chars: Option<usize>,
    finished: bool,
    canceled: bool,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct InputResult {
    pub input: String,
    pub finished: bool,
    pub canceled: bool,
    pub cursor: usize,
}

impl Inputter {
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars: Some(max_chars),
            ..Default::default()
        }
    }

    pub fn read(&mut self, key: KeyEvent) -> InputResult {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => self.finished = true,
            (KeyCode::Esc, _) => {
                self.finished = true;
                self.canceled = true;
            }
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Left, _) => self.cursor = self.cursor.saturating_sub(1),
            (KeyCode::Right, _) => self.cursor = std::cmp::min(self.cursor + 1, self.len()),
            (KeyCode::Home, _) => self.cursor = 0,
            (KeyCode::End, _) => self.cursor = self.len(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear(),
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => self.insert(c),
            _ => trace!("Input ignores {:?}", key),
        }
        self.get()
    }

    /// Starts a fresh edit of `s` with the cursor at the end.
    pub fn set(&mut self, s: &str) {
        self.text = s.to_string();
        self.cursor = self.len();
        self.finished = false;
        self.canceled = false;
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn get(&self) -> InputResult {
        InputResult {
            input: self.text.clone(),
            finished: self.finished,
            canceled: self.canceled,
            cursor: self.cursor,
        }
    }

    /// Empties the text and forgets a previous enter or escape.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.finished = false;
        self.canceled = false;
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn insert(&mut self, c: char) {
        if self.max_chars.is_some_and(|max| self.len() >= max) {
            return;
        }
        let pos = self.byte_pos(self.cursor);
        self.text.insert(pos, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let pos = self.byte_pos(self.cursor);
            self.text.remove(pos);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let pos = self.byte_pos(self.cursor);
            self.text.remove(pos);
        }
    }

    fn byte_pos(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut Inputter, s: &str) {
        for c in s.chars() {
            input.read(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn edits_at_the_cursor() {
        let mut input = Inputter::default();
        type_str(&mut input, "Jkrta");
        input.read(key(KeyCode::Home));
        input.read(key(KeyCode::Right));
        type_str(&mut input, "a");
        input.read(key(KeyCode::End));
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Left));
        type_str(&mut input, "a");
        assert_eq!(input.value(), "Jakarta");
        input.read(key(KeyCode::Backspace));
        input.read(key(KeyCode::Delete));
        assert_eq!(input.value(), "Jakta");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = Inputter::default();
        type_str(&mut input, "≤1ä");
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Backspace));
        assert_eq!(input.value(), "≤ä");
        assert_eq!(input.get().cursor, 1);
    }

    #[test]
    fn enter_and_escape_finish() {
        let mut input = Inputter::default();
        type_str(&mut input, "abc");
        let result = input.read(key(KeyCode::Enter));
        assert!(result.finished && !result.canceled);
        input.set("abc");
        let result = input.read(key(KeyCode::Esc));
        assert!(result.finished && result.canceled);
        assert_eq!(result.input, "abc");
        input.clear();
        assert_eq!(input.get(), InputResult::default());
    }

    #[test]
    fn respects_max_chars() {
        let mut input = Inputter::with_max_chars(10);
        type_str(&mut input, "2025-12-101234");
        assert_eq!(input.value(), "2025-12-10");
    }
}
