use colorsource_core::{GrammarTable, highlight};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const GRAMMAR: &str = r#"
name: bench-c
states:
  - - ["/\\*", "sh_comment", 1, false]
    - ["//.*", "sh_comment", -1, true]
    - ["\"", "sh_string", 2, false]
    - ["\\b(?:if|else|for|while|return|int|char|void)\\b", "sh_keyword", -1, true]
    - ["\\b\\d+\\b", "sh_number", -1, true]
    - ["[{}();,=+*<>-]", "sh_symbol", -1, true]
  - - ["\\*/", "sh_comment", -2, false]
  - - ["\\\\.", "sh_specialchar", -1, true]
    - ["\"", "sh_string", -2, false]
"#;

fn large_source(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        match i % 4 {
            0 => out.push_str(&format!("int value_{i} = {i} + 42; // trailing comment\n")),
            1 => out.push_str("/* a block comment that\n"),
            2 => out.push_str("   spans lines */ if (x < 3) { return \"str\\n\"; }\n"),
            _ => out.push_str("for (int j = 0; j < 10; j = j + 1) { call(j, \"a\", 'b'); }\n"),
        }
    }
    out.pop();
    out
}

fn bench_highlight_large_source(c: &mut Criterion) {
    let grammar = GrammarTable::from_yaml_str(GRAMMAR).unwrap();
    let text = large_source(20_000);
    c.bench_function("highlight/20k_lines", |b| {
        b.iter(|| {
            let tags = highlight(black_box(&text), &grammar, "").unwrap();
            black_box(tags.len());
        })
    });
}

fn bench_highlight_long_line(c: &mut Criterion) {
    let grammar = GrammarTable::from_yaml_str(GRAMMAR).unwrap();
    let text = "x = 1 + 2; ".repeat(5_000);
    c.bench_function("highlight/long_line", |b| {
        b.iter(|| {
            let tags = highlight(black_box(&text), &grammar, "").unwrap();
            black_box(tags.len());
        })
    });
}

criterion_group!(benches, bench_highlight_large_source, bench_highlight_long_line);
criterion_main!(benches);
