use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::{Command, CursorBlink, GapBuffer, LINE_SEPARATOR};
use crate::config::EditorConfig;
use crate::error::Result;

/// Cursor position as a zero-based line and byte column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Lifecycle of an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Quit,
}

/// An editing session over a single [`GapBuffer`].
///
/// The cursor is always the line/column of the gap start within the logical
/// text. Horizontal moves and edits update it incrementally; vertical moves
/// and line queries scan the text.
///
/// Operations at the edges of the text or on the first/last line are no-ops.
/// Once [`request_quit`](Self::request_quit) has been called every edit and
/// move is ignored.
#[derive(Debug)]
pub struct EditorState {
    buffer: GapBuffer,
    cursor: Cursor,
    run_state: RunState,
    blink: CursorBlink,
    tab_width: usize,
}

impl EditorState {
    /// Create an empty session with the default tab width and blink cadence.
    ///
    /// # Errors
    ///
    /// Fails if the buffer cannot be created; see [`GapBuffer::new`].
    pub fn new(initial_capacity: usize) -> Result<Self> {
        Self::with_config(&EditorConfig {
            initial_capacity,
            ..EditorConfig::default()
        })
    }

    /// Create an empty session from resolved configuration.
    ///
    /// # Errors
    ///
    /// Fails if the buffer cannot be created; see [`GapBuffer::new`].
    pub fn with_config(config: &EditorConfig) -> Result<Self> {
        Ok(Self {
            buffer: GapBuffer::new(config.initial_capacity)?,
            cursor: Cursor::default(),
            run_state: RunState::Running,
            blink: CursorBlink::new(config.blink_interval, Instant::now()),
            tab_width: config.tab_width,
        })
    }

    // --- Queries ---

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn cursor_line(&self) -> usize {
        self.cursor.line
    }

    pub const fn cursor_col(&self) -> usize {
        self.cursor.col
    }

    pub const fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub const fn cursor_visible(&self) -> bool {
        self.blink.visible()
    }

    pub const fn last_blink(&self) -> Instant {
        self.blink.last_blink()
    }

    pub const fn blink_interval(&self) -> Duration {
        self.blink.interval()
    }

    /// The whole document as it stands.
    pub fn current_text(&self) -> Vec<u8> {
        self.buffer.to_text()
    }

    /// The document split into display lines, separators removed.
    ///
    /// Always returns at least one (possibly empty) line.
    pub fn lines(&self) -> Vec<String> {
        self.current_text()
            .split(|&b| b == LINE_SEPARATOR)
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// Number of bytes in `line`, not counting its separator.
    ///
    /// Lines past the end of the text have length zero. Scans the text from
    /// the start on every call.
    pub fn line_length(&self, line: usize) -> usize {
        let mut current = 0;
        let mut len = 0;
        for byte in self.buffer.bytes() {
            if byte == LINE_SEPARATOR {
                if current == line {
                    break;
                }
                current += 1;
            } else if current == line {
                len += 1;
            }
        }
        len
    }

    /// Number of lines: one more than the number of separators.
    pub fn total_line_count(&self) -> usize {
        self.buffer.bytes().filter(|&b| b == LINE_SEPARATOR).count() + 1
    }

    // --- Edits ---

    /// Insert `byte` at the cursor.
    ///
    /// # Errors
    ///
    /// Fails only if the buffer has to grow and cannot.
    pub fn insert_char(&mut self, byte: u8) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        self.touch();
        self.buffer.insert(byte)?;
        if byte == LINE_SEPARATOR {
            self.cursor.line += 1;
            self.cursor.col = 0;
        } else {
            self.cursor.col += 1;
        }
        Ok(())
    }

    /// Delete the byte before the cursor.
    pub fn backspace(&mut self) {
        if !self.is_running() {
            return;
        }
        self.touch();
        let Some(deleted) = self.buffer.delete_before() else {
            return;
        };
        if deleted == LINE_SEPARATOR {
            // The cursor now sits where the two lines were joined.
            self.cursor.line -= 1;
            self.cursor.col = self.gap_column();
        } else {
            self.cursor.col = self.cursor.col.saturating_sub(1);
        }
    }

    // --- Movement ---

    pub fn move_left(&mut self) {
        if !self.is_running() {
            return;
        }
        self.touch();
        self.step_left();
    }

    pub fn move_right(&mut self) {
        if !self.is_running() {
            return;
        }
        self.touch();
        self.step_right();
    }

    /// Move to the same column on the previous line, or to its end if it is
    /// shorter.
    pub fn move_up(&mut self) {
        if !self.is_running() {
            return;
        }
        self.touch();
        if self.cursor.line == 0 {
            return;
        }
        let target_col = self.cursor.col;

        self.step_left_to_line_start();
        // Cross the separator that ends the previous line.
        self.step_left();
        self.step_left_to_line_start();

        let col = target_col.min(self.line_length(self.cursor.line));
        self.step_right_within_line(col);
    }

    /// Move to the same column on the next line, or to its end if it is
    /// shorter.
    pub fn move_down(&mut self) {
        if !self.is_running() {
            return;
        }
        self.touch();
        if self.cursor.line + 1 >= self.total_line_count() {
            return;
        }
        let target_col = self.cursor.col;

        while self
            .buffer
            .peek_after()
            .is_some_and(|b| b != LINE_SEPARATOR)
        {
            self.step_right();
        }
        // Cross the separator onto the start of the next line.
        self.step_right();

        let col = target_col.min(self.line_length(self.cursor.line));
        self.step_right_within_line(col);
    }

    // --- Session ---

    /// Dispatch a single input command.
    ///
    /// # Errors
    ///
    /// Propagates buffer growth failures from inserting commands.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        trace!(?command, cursor = ?self.cursor, "apply");
        match command {
            Command::Insert(byte) => self.insert_char(byte)?,
            Command::Newline => self.insert_char(LINE_SEPARATOR)?,
            Command::Tab => {
                // Grow up front so a failed allocation leaves no partial tab.
                if self.is_running() {
                    self.buffer.reserve(self.tab_width)?;
                }
                for _ in 0..self.tab_width {
                    self.insert_char(b' ')?;
                }
            }
            Command::Backspace => self.backspace(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::Quit => self.request_quit(),
        }
        Ok(())
    }

    /// Stop processing edits. There is no way back to running.
    pub fn request_quit(&mut self) {
        if self.run_state == RunState::Quit {
            return;
        }
        debug!(len = self.buffer.len(), "quit requested");
        self.run_state = RunState::Quit;
    }

    /// Advance the caret blink cycle to `now`. Returns `true` if the caret
    /// changed visibility.
    pub fn tick_blink(&mut self, now: Instant) -> bool {
        self.blink.tick(now)
    }

    // --- Private helpers ---

    fn touch(&mut self) {
        self.blink.reset(Instant::now());
    }

    fn step_left(&mut self) {
        let Some(crossed) = self.buffer.peek_before() else {
            return;
        };
        self.buffer.move_left();
        if crossed == LINE_SEPARATOR {
            self.cursor.line -= 1;
            self.cursor.col = self.line_length(self.cursor.line);
        } else {
            self.cursor.col -= 1;
        }
    }

    fn step_right(&mut self) {
        let Some(crossed) = self.buffer.peek_after() else {
            return;
        };
        self.buffer.move_right();
        if crossed == LINE_SEPARATOR {
            self.cursor.line += 1;
            self.cursor.col = 0;
        } else {
            self.cursor.col += 1;
        }
    }

    fn step_left_to_line_start(&mut self) {
        while self
            .buffer
            .peek_before()
            .is_some_and(|b| b != LINE_SEPARATOR)
        {
            self.step_left();
        }
    }

    fn step_right_within_line(&mut self, steps: usize) {
        for _ in 0..steps {
            if self.buffer.peek_after() == Some(LINE_SEPARATOR) {
                break;
            }
            self.step_right();
        }
    }

    /// Column of the gap, counted back to the previous separator.
    fn gap_column(&self) -> usize {
        self.buffer
            .before()
            .iter()
            .rev()
            .take_while(|&&b| b != LINE_SEPARATOR)
            .count()
    }
}
