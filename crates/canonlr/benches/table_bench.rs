use canonlr::{Grammar, Lr1Parser};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn classical_grammar() -> Grammar {
    Grammar::builder()
        .rule("E", &["E", "+", "T"])
        .rule("E", &["T"])
        .rule("T", &["T", "*", "F"])
        .rule("T", &["F"])
        .rule("F", &["(", "E", ")"])
        .rule("F", &["id"])
        .start("E")
        .build()
        .expect("classical grammar builds")
}

/// id + id * id + id * id + …, `pairs` operator pairs long.
fn long_expression(pairs: usize) -> Vec<&'static str> {
    let mut tokens = vec!["id"];
    for i in 0..pairs {
        tokens.push(if i % 2 == 0 { "+" } else { "*" });
        tokens.push("id");
    }
    tokens
}

fn bench_table_construction(c: &mut Criterion) {
    c.bench_function("build_classical_tables", |b| {
        b.iter(|| {
            let parser = Lr1Parser::new(black_box(classical_grammar()));
            black_box(parser.tables().num_states())
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    let parser = Lr1Parser::new(classical_grammar());
    let tokens = long_expression(500);

    c.bench_function("parse_long_expression", |b| {
        b.iter(|| {
            let parse = parser.parse(black_box(&tokens)).expect("sentence parses");
            black_box(parse.derivation.len())
        });
    });
}

criterion_group!(benches, bench_table_construction, bench_parse);
criterion_main!(benches);
