use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Initial gap buffer size when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 1024;
/// Spaces inserted for a tab.
pub const DEFAULT_TAB_WIDTH: usize = 4;
/// Caret blink half-period.
pub const DEFAULT_BLINK_MS: u64 = 500;

/// Settings as they appear in rc files and on the command line.
///
/// Every field is optional so that sources can be layered with
/// [`union`](Self::union).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub capacity: Option<usize>,
    pub tab_width: Option<usize>,
    pub blink_ms: Option<u64>,
}

impl ConfigFlags {
    /// Merge two sources; values set in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            capacity: other.capacity.or(self.capacity),
            tab_width: other.tab_width.or(self.tab_width),
            blink_ms: other.blink_ms.or(self.blink_ms),
        }
    }
}

/// Resolved settings for an [`EditorState`](crate::editor::EditorState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub initial_capacity: usize,
    pub tab_width: usize,
    pub blink_interval: Duration,
}

impl EditorConfig {
    pub fn from_flags(flags: &ConfigFlags) -> Self {
        Self {
            initial_capacity: flags.capacity.unwrap_or(DEFAULT_CAPACITY),
            tab_width: flags.tab_width.unwrap_or(DEFAULT_TAB_WIDTH),
            blink_interval: Duration::from_millis(flags.blink_ms.unwrap_or(DEFAULT_BLINK_MS)),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::from_flags(&ConfigFlags::default())
    }
}

/// Where `--save` writes and the first rc file read at startup.
///
/// `GAPEDIT_CONFIG` names the file directly; otherwise it lives under the
/// XDG config directory, falling back to `~/.config`.
pub fn global_config_path() -> PathBuf {
    config_path_from(
        std::env::var_os("GAPEDIT_CONFIG"),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_path_from(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_dir = xdg_config_home
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| PathBuf::from(home).join(".config")));
    config_dir.map_or_else(local_override_path, |dir| dir.join("gapedit").join("config"))
}

/// Per-directory overrides, read after the global file.
pub fn local_override_path() -> PathBuf {
    PathBuf::from(".gapeditrc")
}

/// Read flag tokens from an rc file. A missing file yields empty flags.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ConfigFlags::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read config {}", path.display()));
        }
    };
    let tokens: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(String::from)
        .collect();
    Ok(parse_flag_tokens(&tokens))
}

/// Write the set flags to `path`, one per line.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# gapedit defaults (saved with --save)".to_string()];
    if let Some(capacity) = flags.capacity {
        lines.push(format!("--capacity {capacity}"));
    }
    if let Some(tab_width) = flags.tab_width {
        lines.push(format!("--tab-width {tab_width}"));
    }
    if let Some(blink_ms) = flags.blink_ms {
        lines.push(format!("--blink-ms {blink_ms}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved rc file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("Failed to remove {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Extract known flags from a token list, skipping everything else.
///
/// Both `--flag value` and `--flag=value` are accepted. Values that do not
/// parse as numbers are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        if matches!(name, "--capacity" | "--tab-width" | "--blink-ms") {
            let value = match inline {
                Some(value) => Some(value),
                None => {
                    i += 1;
                    tokens.get(i).map(String::as_str)
                }
            };
            match name {
                "--capacity" => flags.capacity = parse_value(value).or(flags.capacity),
                "--tab-width" => flags.tab_width = parse_value(value).or(flags.tab_width),
                _ => flags.blink_ms = parse_value(value).or(flags.blink_ms),
            }
        }
        i += 1;
    }
    flags
}

fn parse_value<T: FromStr>(value: Option<&str>) -> Option<T> {
    value?.parse().ok()
}
