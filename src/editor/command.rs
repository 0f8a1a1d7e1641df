use thiserror::Error;

use super::LINE_SEPARATOR;

/// A discrete input command understood by [`EditorState::apply`].
///
/// [`EditorState::apply`]: super::EditorState::apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert one byte at the cursor.
    Insert(u8),
    /// Insert a line separator.
    Newline,
    /// Insert `tab_width` spaces.
    Tab,
    Backspace,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Leave the running state.
    Quit,
}

/// Errors from [`parse_script`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("non-ASCII character {ch:?} at offset {offset}")]
    NonAscii { ch: char, offset: usize },

    #[error("unknown key <{name}> at offset {offset}")]
    UnknownKey { name: String, offset: usize },

    #[error("unterminated key name starting at offset {offset}")]
    UnterminatedKey { offset: usize },
}

/// Parse a key script into commands.
///
/// Plain ASCII characters insert themselves (a literal newline inserts the
/// line separator). Special keys are written in angle brackets and matched
/// case-insensitively: `<Enter>`, `<CR>`, `<Tab>`, `<BS>`, `<Backspace>`,
/// `<Left>`, `<Right>`, `<Up>`, `<Down>`, `<Esc>` and `<lt>` for a literal
/// `<`.
///
/// # Errors
///
/// Returns a [`ScriptError`] for non-ASCII input, an unknown key name or a
/// `<` with no closing `>`.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::with_capacity(script.len());
    let mut rest = script.char_indices();

    while let Some((offset, ch)) = rest.next() {
        if ch == '<' {
            let tail = &script[offset + 1..];
            let close = tail
                .find('>')
                .ok_or(ScriptError::UnterminatedKey { offset })?;
            let name = &tail[..close];
            commands.push(key_command(name).ok_or_else(|| ScriptError::UnknownKey {
                name: name.to_string(),
                offset,
            })?);
            // Skip the name and the closing bracket.
            for _ in 0..=name.chars().count() {
                rest.next();
            }
            continue;
        }

        let byte = u8::try_from(ch)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(ScriptError::NonAscii { ch, offset })?;
        commands.push(if byte == LINE_SEPARATOR {
            Command::Newline
        } else {
            Command::Insert(byte)
        });
    }

    Ok(commands)
}

fn key_command(name: &str) -> Option<Command> {
    let command = match name.to_ascii_lowercase().as_str() {
        "enter" | "cr" | "return" => Command::Newline,
        "tab" => Command::Tab,
        "bs" | "backspace" => Command::Backspace,
        "left" => Command::MoveLeft,
        "right" => Command::MoveRight,
        "up" => Command::MoveUp,
        "down" => Command::MoveDown,
        "esc" | "escape" => Command::Quit,
        "lt" => Command::Insert(b'<'),
        _ => return None,
    };
    Some(command)
}
