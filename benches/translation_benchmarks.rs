use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nc_gloss::{Dictionary, tokenize_line, translate_document, translate_line};

/// Generate lathe program content of different patterns for benchmarking
fn generate_program(lines: usize, pattern: &str) -> String {
    let mut content = String::new();

    match pattern {
        "glued" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "N{}G1X{:.3}Z{:.3}F0.1;\n",
                    i,
                    (i as f32) * 0.1,
                    -(i as f32) * 0.05
                ));
            }
        }
        "comment_heavy" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "G0 X{:.1} Z2. (approach {} of tool T0101) M8\n",
                    (i as f32) * 0.5,
                    i
                ));
            }
        }
        "macro" => {
            for i in 0..lines {
                content.push_str(&format!("IF [#{} GT {}] GOTO{}\n", 100 + i % 10, i, i % 50));
            }
        }
        _ => {
            for i in 0..lines {
                match i % 4 {
                    0 => content.push_str(&format!("G1 X{:.3} Z{:.3} F0.15\n", i as f32, i as f32)),
                    1 => content.push_str(&format!("(SECTION {})\n", i / 4)),
                    2 => content.push_str(&format!("G96 S{} M3\n", 100 + i % 50)),
                    3 => content.push_str("G28 U0 W0\n"),
                    _ => unreachable!(),
                }
            }
        }
    }

    content
}

/// Benchmark tokenizing and translating single lines
fn bench_single_line(c: &mut Criterion) {
    let dictionary = Dictionary::builtin();
    let test_lines = vec![
        ("simple_move", "G1 X10 Z20"),
        ("glued", "N100G0X38.0Z2.M8;"),
        ("with_comment", "G0 X10 (rapid move) Z5"),
        ("unknown", "G999 T0101 Q?"),
        ("macro", "IF [#1 EQ #2] GOTO20"),
    ];

    let mut group = c.benchmark_group("single_line");

    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::new("tokenize_line", name), &line, |b, line| {
            b.iter(|| black_box(tokenize_line(black_box(line))))
        });
        group.bench_with_input(BenchmarkId::new("translate_line", name), &line, |b, line| {
            b.iter(|| black_box(translate_line(black_box(line), &dictionary, Some("BE12"))))
        });
    }

    group.finish();
}

/// Benchmark whole-program translation
fn bench_document(c: &mut Criterion) {
    let dictionary = Dictionary::builtin();
    let sizes = vec![100, 1_000, 10_000, 100_000];
    let patterns = vec!["glued", "comment_heavy", "macro", "mixed"];

    let mut group = c.benchmark_group("translate_document");

    for &size in &sizes {
        for pattern in &patterns {
            let content = generate_program(size, pattern);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(*pattern, size),
                &content,
                |b, content| {
                    b.iter(|| black_box(translate_document(black_box(content), &dictionary, None)))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_single_line, bench_document);
criterion_main!(benches);
