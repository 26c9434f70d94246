use std::collections::VecDeque;

use bitflags::bitflags;

use super::buffer::COLS;

/// Input line width: the screen width minus the prompt.
pub const INPUT: usize = COLS - 2;
pub const HISTORY: usize = 100;

bitflags! {
    /// Modifier keys held while a key was pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// Keys the console reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKey {
    Char(char),
    Enter,
    Backspace,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
}

/// Single-line editor with cursor movement and history.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    input: Vec<char>,
    cursor: usize,
    /// Newest entry first.
    history: VecDeque<String>,
    /// Position in `history` while browsing it.
    look: Option<usize>,
}

impl LineEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.input.iter().collect()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn history(&self) -> &VecDeque<String> {
        &self.history
    }

    /// Applies an editing key. Returns the submitted line on Enter.
    pub fn key(&mut self, key: ConsoleKey, mods: Modifiers) -> Option<String> {
        if mods.contains(Modifiers::ALT) {
            return None;
        }
        if mods.contains(Modifiers::CTRL) {
            if let ConsoleKey::Char(c) = key {
                self.control(c);
            }
            return None;
        }

        match key {
            ConsoleKey::Enter => return Some(self.submit()),
            ConsoleKey::Backspace => self.delete_back(),
            ConsoleKey::Char(c) if is_insertable(c) => self.insert(c),
            ConsoleKey::Char(_) => {}
            ConsoleKey::Left => self.cursor = self.cursor.saturating_sub(1),
            ConsoleKey::Right => self.cursor = (self.cursor + 1).min(self.input.len()),
            ConsoleKey::Home => self.cursor = 0,
            ConsoleKey::End => self.cursor = self.input.len(),
            ConsoleKey::Up => self.history_prev(),
            ConsoleKey::Down => self.history_next(),
        }
        None
    }

    fn control(&mut self, c: char) {
        match c.to_ascii_lowercase() {
            'a' => self.cursor = 0,
            'e' => self.cursor = self.input.len(),
            'u' => {
                while self.cursor > 0 {
                    self.delete_back();
                }
            }
            'w' => {
                while self.cursor > 0 && !self.input[self.cursor - 1].is_ascii_alphanumeric() {
                    self.delete_back();
                }
                while self.cursor > 0 && self.input[self.cursor - 1].is_ascii_alphanumeric() {
                    self.delete_back();
                }
            }
            _ => {}
        }
    }

    pub fn insert(&mut self, c: char) {
        self.look = None;
        // One column stays free for the cursor.
        if self.input.len() + 1 < INPUT {
            self.input.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    pub fn delete_back(&mut self) {
        self.look = None;
        if self.cursor > 0 {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    /// Takes the current line, records it in history and clears the input.
    pub fn submit(&mut self) -> String {
        let line = self.text();
        if !line.is_empty() {
            self.history.push_front(line.clone());
            self.history.truncate(HISTORY);
        }
        self.look = None;
        self.set_input("");
        line
    }

    fn set_input(&mut self, s: &str) {
        self.input = s.chars().collect();
        self.cursor = self.input.len();
    }

    fn history_prev(&mut self) {
        let candidate = self.look.map_or(0, |i| i + 1);
        if let Some(entry) = self.history.get(candidate) {
            let entry = entry.clone();
            self.look = Some(candidate);
            self.set_input(&entry);
        }
    }

    fn history_next(&mut self) {
        self.look = self.look.and_then(|i| i.checked_sub(1));
        match self.look.and_then(|i| self.history.get(i)) {
            Some(entry) => {
                let entry = entry.clone();
                self.set_input(&entry);
            }
            None => self.set_input(""),
        }
    }
}

/// Printable ASCII only.
fn is_insertable(c: char) -> bool {
    c == ' ' || c.is_ascii_graphic()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut LineEditor, s: &str) {
        for c in s.chars() {
            editor.key(ConsoleKey::Char(c), Modifiers::empty());
        }
    }

    #[test]
    fn insert_at_cursor() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "helo");
        ed.key(ConsoleKey::Left, Modifiers::empty());
        type_str(&mut ed, "l");
        assert_eq!(ed.text(), "hello");
        assert_eq!(ed.cursor(), 4);
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "move cube  ");
        ed.key(ConsoleKey::Char('w'), Modifiers::CTRL);
        assert_eq!(ed.text(), "move ");
        ed.key(ConsoleKey::Char('u'), Modifiers::CTRL);
        assert_eq!(ed.text(), "");
    }

    #[test]
    fn alt_keys_are_ignored() {
        let mut ed = LineEditor::new();
        ed.key(ConsoleKey::Char('x'), Modifiers::ALT);
        assert_eq!(ed.key(ConsoleKey::Enter, Modifiers::ALT), None);
        assert_eq!(ed.text(), "");
    }

    #[test]
    fn input_is_capped() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, &"a".repeat(200));
        assert_eq!(ed.text().len(), INPUT - 1);
    }

    #[test]
    fn history_navigation() {
        let mut ed = LineEditor::new();
        type_str(&mut ed, "one");
        ed.key(ConsoleKey::Enter, Modifiers::empty());
        ed.key(ConsoleKey::Enter, Modifiers::empty());
        type_str(&mut ed, "two");
        ed.key(ConsoleKey::Enter, Modifiers::empty());
        assert_eq!(ed.history().len(), 2);

        ed.key(ConsoleKey::Up, Modifiers::empty());
        assert_eq!(ed.text(), "two");
        ed.key(ConsoleKey::Up, Modifiers::empty());
        assert_eq!(ed.text(), "one");
        ed.key(ConsoleKey::Up, Modifiers::empty());
        assert_eq!(ed.text(), "one");
        ed.key(ConsoleKey::Down, Modifiers::empty());
        assert_eq!(ed.text(), "two");
        ed.key(ConsoleKey::Down, Modifiers::empty());
        assert_eq!(ed.text(), "");
    }
}
