#![allow(
    // module_name_repetitions is pure style preference (e.g. editor::EditorState)
    clippy::module_name_repetitions
)]

//! # Gapedit
//!
//! A minimal text-editing core: a byte gap buffer with a line/column cursor
//! layered on top.
//!
//! Gapedit provides:
//! - Amortized O(1) insertion and deletion at the cursor
//! - Incremental line/column tracking across edits and moves
//! - Up/down navigation that keeps the column or clamps to shorter lines
//! - Caret blink bookkeeping for a presentation layer to poll
//!
//! Windowing, rendering and scrolling belong to the caller. The core takes
//! discrete [`editor::Command`]s and answers queries about the text and
//! cursor.
//!
//! ## Modules
//!
//! - [`editor`]: gap buffer, editor state, commands and key scripts
//! - [`config`]: rc-file and command-line settings
//! - [`error`]: buffer error types

pub mod config;
pub mod editor;
pub mod error;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::EditorConfig;
    pub use crate::editor::{Command, Cursor, EditorState, GapBuffer};
    pub use crate::error::BufferError;
}
