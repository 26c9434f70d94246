use std::collections::VecDeque;

pub const ROWS: usize = 23;
pub const COLS: usize = 80;
pub const TAB_STOP: usize = 8;

/// Scrolling text screen of [`ROWS`] x [`COLS`] characters.
///
/// Output is always written to the bottom row; a newline (or running past
/// the last column) scrolls every row up by one.
#[derive(Debug, Clone)]
pub struct ScreenBuffer {
    rows: VecDeque<String>,
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: std::iter::repeat_with(String::new).take(ROWS).collect(),
        }
    }

    fn scroll_up(&mut self) {
        self.rows.pop_front();
        self.rows.push_back(String::new());
    }

    fn tail(&self) -> usize {
        self.rows.back().map_or(0, |row| row.chars().count())
    }

    fn push_char(&mut self, c: char) {
        if let Some(row) = self.rows.back_mut() {
            row.push(c);
        }
    }

    pub fn putc(&mut self, c: char) {
        match c {
            '\n' => self.scroll_up(),
            '\t' => {
                let tail = self.tail();
                let spaces = (tail / TAB_STOP + 1) * TAB_STOP - tail;
                for _ in 0..spaces {
                    self.putc(' ');
                }
            }
            _ => {
                if self.tail() >= COLS {
                    self.scroll_up();
                }
                self.push_char(c);
            }
        }
    }

    pub fn print(&mut self, s: &str) {
        for c in s.chars() {
            self.putc(c);
        }
    }

    /// Prints `s` and ends the line.
    pub fn printnl(&mut self, s: &str) {
        self.print(s);
        self.scroll_up();
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    /// Rows from top to bottom. The last one is the line being written.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(String::as_str)
    }

    /// Completed, non-empty lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        let completed = self.rows.len().saturating_sub(1);
        self.rows
            .iter()
            .take(completed)
            .map(String::as_str)
            .filter(|row| !row.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printnl_scrolls_line_up() {
        let mut screen = ScreenBuffer::new();
        screen.printnl("hello");
        screen.printnl("world");
        assert_eq!(screen.lines(), vec!["hello", "world"]);
        assert_eq!(screen.rows().last(), Some(""));
    }

    #[test]
    fn long_output_wraps_at_last_column() {
        let mut screen = ScreenBuffer::new();
        screen.print(&"x".repeat(COLS + 3));
        assert_eq!(screen.lines(), vec!["x".repeat(COLS).as_str()]);
        assert_eq!(screen.rows().last(), Some("xxx"));
    }

    #[test]
    fn tab_advances_to_next_stop() {
        let mut screen = ScreenBuffer::new();
        screen.print("ab\tc");
        assert_eq!(screen.rows().last(), Some("ab      c"));
        screen.print("\t");
        assert_eq!(screen.rows().last().map(str::len), Some(16));
    }

    #[test]
    fn old_rows_fall_off_the_top() {
        let mut screen = ScreenBuffer::new();
        for i in 0..ROWS + 5 {
            screen.printnl(&i.to_string());
        }
        assert_eq!(screen.rows().count(), ROWS);
        assert_eq!(screen.lines().first(), Some(&"6"));
    }
}
