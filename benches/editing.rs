//! Benchmarks for gap buffer editing and cursor navigation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gapedit::editor::{EditorState, GapBuffer};

fn sample_document(lines: usize) -> EditorState {
    let mut editor = EditorState::new(1024).unwrap();
    for i in 0..lines {
        for &b in format!("line {i} with some text").as_bytes() {
            editor.insert_char(b).unwrap();
        }
        editor.insert_char(b'\n').unwrap();
    }
    editor
}

fn bench_append_from_tiny_buffer(c: &mut Criterion) {
    c.bench_function("append_10k_from_capacity_1", |b| {
        b.iter(|| {
            let mut buf = GapBuffer::new(1).unwrap();
            for i in 0..10_000u32 {
                buf.insert(black_box((i % 26) as u8 + b'a')).unwrap();
            }
            buf
        })
    });
}

fn bench_vertical_navigation(c: &mut Criterion) {
    let mut editor = sample_document(200);
    c.bench_function("move_up_down_200_lines", |b| {
        b.iter(|| {
            for _ in 0..100 {
                editor.move_up();
            }
            for _ in 0..100 {
                editor.move_down();
            }
            black_box(editor.cursor())
        })
    });
}

fn bench_line_length(c: &mut Criterion) {
    let editor = sample_document(200);
    c.bench_function("line_length_last_line", |b| {
        b.iter(|| editor.line_length(black_box(199)))
    });
}

criterion_group!(
    benches,
    bench_append_from_tiny_buffer,
    bench_vertical_navigation,
    bench_line_length
);
criterion_main!(benches);
