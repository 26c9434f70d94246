//! In-viewer console.
//!
//! - [`ScreenBuffer`]: the scrolling text screen
//! - [`LineEditor`]: the input line with history
//! - [`commands`]: the command language run on submitted lines
//!
//! Command errors are printed to the screen and also handed back to the
//! caller, which decides whether they matter.

pub mod buffer;
pub mod commands;
pub mod editor;

pub use buffer::{COLS, ROWS, ScreenBuffer};
pub use commands::{Command, execute};
pub use editor::{ConsoleKey, HISTORY, INPUT, LineEditor, Modifiers};

use crate::assets::AssetCache;
use crate::errors::CommandError;
use crate::scene::Scene;

pub const PROMPT: &str = "> ";

#[derive(Debug, Clone, Default)]
pub struct Console {
    pub screen: ScreenBuffer,
    pub editor: LineEditor,
}

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, s: &str) {
        self.screen.print(s);
    }

    pub fn printnl(&mut self, s: &str) {
        self.screen.printnl(s);
    }

    /// Prints a warning to the screen and the log.
    pub fn warn(&mut self, message: &str) {
        log::warn!("{message}");
        self.screen.printnl(message);
    }

    /// Feeds one key press to the line editor; a submitted line is run.
    pub fn key(&mut self, key: ConsoleKey, mods: Modifiers, scene: &mut Scene, assets: &AssetCache) {
        if let Some(line) = self.editor.key(key, mods) {
            // Errors are already on screen.
            let _ = self.enter(&line, scene, assets);
        }
    }

    /// Echoes `line` after the prompt, runs it and prints the result.
    pub fn enter(&mut self, line: &str, scene: &mut Scene, assets: &AssetCache) -> Result<Vec<String>, CommandError> {
        self.screen.print(PROMPT);
        self.screen.printnl(line);
        let result = execute(line, scene, assets);
        match &result {
            Ok(output) => {
                for text in output {
                    self.screen.printnl(text);
                }
            }
            Err(err) => {
                log::debug!("Command '{line}' failed: {err}");
                self.screen.printnl(&err.to_string());
            }
        }
        result
    }

    /// Text of the input line including the prompt.
    #[must_use]
    pub fn prompt_line(&self) -> String {
        format!("{PROMPT}{}", self.editor.text())
    }
}
