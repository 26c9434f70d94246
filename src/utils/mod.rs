//! Utility Module
//!
//! - [`split_words`]: whitespace/quote-aware tokenizer shared by the IQE
//!   loader and the console
//! - [`Timer`]: frame timing

pub mod time;
pub mod tokenize;

pub use time::Timer;
pub use tokenize::split_words;
