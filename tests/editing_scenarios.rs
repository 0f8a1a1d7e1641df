use gapedit::editor::{parse_script, Cursor, EditorState, RunState};

fn run(script: &str, capacity: usize) -> EditorState {
    let mut editor = EditorState::new(capacity).unwrap();
    for command in parse_script(script).unwrap() {
        editor.apply(command).unwrap();
    }
    editor
}

fn text(editor: &EditorState) -> String {
    String::from_utf8(editor.current_text()).unwrap()
}

#[test]
fn test_typing_with_corrections() {
    let editor = run("helo<BS><BS>llo<Enter>world", 4);
    assert_eq!(text(&editor), "hello\nworld");
    assert_eq!(editor.cursor(), Cursor::at(1, 5));
    assert_eq!(editor.lines(), vec!["hello", "world"]);
}

#[test]
fn test_insert_in_middle_of_previous_line() {
    let editor = run("fist<Enter>second<Up><Left><Left>r", 8);
    assert_eq!(text(&editor), "first\nsecond");
    assert_eq!(editor.cursor(), Cursor::at(0, 3));
}

#[test]
fn test_vertical_walk_through_ragged_lines() {
    let mut editor = run("a long line<Enter>ab<Enter><Enter>another long one", 2);
    assert_eq!(editor.total_line_count(), 4);

    editor.move_up();
    assert_eq!(editor.cursor(), Cursor::at(2, 0));
    editor.move_up();
    assert_eq!(editor.cursor(), Cursor::at(1, 0));
    editor.move_right();
    editor.move_right();
    editor.move_up();
    assert_eq!(editor.cursor(), Cursor::at(0, 2));
    editor.move_down();
    editor.move_down();
    editor.move_down();
    assert_eq!(editor.cursor(), Cursor::at(3, 0));
    editor.move_down();
    assert_eq!(editor.cursor(), Cursor::at(3, 0));
}

#[test]
fn test_backspace_across_lines_joins_them() {
    let editor = run("ab<Enter>cd<Left><Left><BS>", 4);
    assert_eq!(text(&editor), "abcd");
    assert_eq!(editor.cursor(), Cursor::at(0, 2));
    assert_eq!(editor.total_line_count(), 1);
}

#[test]
fn test_escape_ends_session() {
    let editor = run("ab<Esc>cd", 4);
    assert_eq!(editor.run_state(), RunState::Quit);
    assert_eq!(text(&editor), "ab");
}

#[test]
fn test_growth_preserves_content_and_cursor() {
    let mut editor = EditorState::new(1).unwrap();
    let input: Vec<u8> = (0..10_000u32)
        .map(|i| b"0123456789abcdef"[(i % 16) as usize])
        .collect();
    for &b in &input {
        editor.insert_char(b).unwrap();
    }
    assert_eq!(editor.current_text(), input);
    assert_eq!(editor.buffer().len(), 10_000);
    assert_eq!(editor.cursor(), Cursor::at(0, 10_000));
    assert_eq!(editor.buffer().gap_start(), 10_000);
}

#[test]
fn test_growth_with_cursor_in_middle() {
    let mut editor = run("head<Enter>tail", 1);
    for _ in 0..5 {
        editor.move_left();
    }
    assert_eq!(editor.cursor(), Cursor::at(0, 4));
    for b in b"-body-" {
        editor.insert_char(*b).unwrap();
    }
    assert_eq!(text(&editor), "head-body-\ntail");
    assert_eq!(editor.cursor(), Cursor::at(0, 10));
}

#[test]
fn test_layout_reflects_cursor() {
    let editor = run("ab<Left>", 4);
    assert_eq!(editor.buffer().layout(), "[a<__>b]");
}
