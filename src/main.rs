//! Gapedit - replay a key script against the gap-buffer editing core.
//!
//! # Usage
//!
//! ```bash
//! gapedit 'ab<Enter>cd<Up><BS>'
//! echo 'hello<Left><Left>X' | gapedit --layout
//! gapedit --capacity 4 --numbered 'one<Enter>two'
//! ```

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;

use gapedit::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags, ConfigFlags, EditorConfig,
};
use gapedit::editor::{parse_script, EditorState};

/// Replay a key script against the gap-buffer editing core
#[derive(Parser, Debug)]
#[command(name = "gapedit", version, about, long_about = None)]
struct Cli {
    /// Key script, e.g. 'ab<Enter>cd<Up><BS>'. Read from stdin when omitted or "-"
    #[arg(value_name = "SCRIPT")]
    script: Option<String>,

    /// Initial gap buffer capacity in bytes
    #[arg(long, value_name = "BYTES")]
    capacity: Option<usize>,

    /// Spaces inserted by <Tab>
    #[arg(long, value_name = "N")]
    tab_width: Option<usize>,

    /// Caret blink interval in milliseconds
    #[arg(long, value_name = "MS")]
    blink_ms: Option<u64>,

    /// Print the raw buffer layout with gap markers
    #[arg(long)]
    layout: bool,

    /// Print the text with line numbers
    #[arg(long)]
    numbered: bool,

    /// Save current command-line settings as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn read_script(cli: &Cli) -> Result<String> {
    match cli.script.as_deref() {
        Some(script) if script != "-" => Ok(script.to_string()),
        _ => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read key script from stdin")?;
            // A trailing newline from `echo` is not part of the script.
            if script.ends_with('\n') {
                script.pop();
            }
            Ok(script)
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        capacity: cli.capacity,
        tab_width: cli.tab_width,
        blink_ms: cli.blink_ms,
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let config = EditorConfig::from_flags(&file_flags.union(&cli_flags));
    tracing::debug!(?config, "resolved configuration");

    let script = read_script(&cli)?;
    let commands = parse_script(&script).context("Invalid key script")?;

    let mut editor = EditorState::with_config(&config).context("Failed to create editor")?;
    for command in commands {
        if !editor.is_running() {
            break;
        }
        editor
            .apply(command)
            .with_context(|| format!("Failed to apply {command:?}"))?;
    }

    if cli.numbered {
        for (i, line) in editor.lines().iter().enumerate() {
            println!("{:>4} {line}", i + 1);
        }
    } else {
        println!("{}", String::from_utf8_lossy(&editor.current_text()));
    }
    println!(
        "cursor: line {}, col {} ({} lines)",
        editor.cursor_line(),
        editor.cursor_col(),
        editor.total_line_count()
    );
    if cli.layout {
        let buffer = editor.buffer();
        println!("Buffer (capacity={}):", buffer.capacity());
        println!("{}", buffer.layout());
    }
    Ok(())
}
