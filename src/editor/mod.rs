//! Gap-buffer editing core.
//!
//! Provides a byte-oriented gap buffer and an editor state that tracks the
//! cursor as a line/column pair on top of it.

mod blink;
mod command;
mod gap_buffer;
mod state;

pub use blink::CursorBlink;
pub use command::{parse_script, Command, ScriptError};
pub use gap_buffer::GapBuffer;
pub use state::{Cursor, EditorState, RunState};

/// The byte that ends a line.
pub const LINE_SEPARATOR: u8 = b'\n';
