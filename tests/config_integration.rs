use std::time::Duration;

use gapedit::config::{load_config_flags, parse_flag_tokens, ConfigFlags, EditorConfig};
use gapedit::editor::{Command, EditorState};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".gapeditrc");
    let content = r#"
# comment
--capacity 8

--tab-width=2

--blink-ms 300
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.capacity, Some(8));
    assert_eq!(flags.tab_width, Some(2));
    assert_eq!(flags.blink_ms, Some(300));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".gapeditrc");
    std::fs::write(&path, "--capacity 8\n--tab-width 2\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "gapedit".to_string(),
        "--tab-width".to_string(),
        "8".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(effective.capacity, Some(8), "file config should be preserved");
    assert_eq!(effective.tab_width, Some(8), "cli should override tab width");
    assert_eq!(effective.blink_ms, None);
}

#[test]
fn test_resolved_config_drives_editor() {
    let flags = ConfigFlags {
        capacity: Some(2),
        tab_width: Some(3),
        blink_ms: Some(250),
    };
    let config = EditorConfig::from_flags(&flags);
    assert_eq!(config.blink_interval, Duration::from_millis(250));

    let mut editor = EditorState::with_config(&config).unwrap();
    assert_eq!(editor.buffer().capacity(), 2);
    assert_eq!(editor.blink_interval(), Duration::from_millis(250));

    editor.apply(Command::Tab).unwrap();
    assert_eq!(editor.current_text(), b"   ");
    assert_eq!(editor.buffer().capacity(), 4);
}

#[test]
fn test_zero_capacity_from_config_is_rejected() {
    let config = EditorConfig::from_flags(&ConfigFlags {
        capacity: Some(0),
        ..ConfigFlags::default()
    });
    assert!(EditorState::with_config(&config).is_err());
}
