use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nuru::catalog::{Catalog, DocItem, Locale};
use nuru::lang::Nuru;
use nuru::pipeline::Pipeline;
use nuru::tutor::list::filter_titles;

/// Baseline: lowercase every title and do a plain substring search.
fn lowercase_contains(items: &[DocItem], query: &str) -> Vec<usize> {
    let q = query.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, i)| i.title().to_lowercase().contains(&q))
        .map(|(n, _)| n)
        .collect()
}

/// The builtin catalog repeated until it has roughly `n` entries.
fn make_items(n: usize) -> Vec<DocItem> {
    let base = Catalog::builtin().items(Locale::English).to_vec();
    base.iter().cycle().take(n).cloned().collect()
}

fn bench_filter(c: &mut Criterion) {
    let small = make_items(16);
    let large = make_items(4096);
    let query = "STR";

    let mut g = c.benchmark_group("filter_titles");
    g.bench_function("lowercase_contains_small", |b| {
        b.iter(|| lowercase_contains(black_box(&small), black_box(query)))
    });
    g.bench_function("aho_corasick_small", |b| {
        b.iter(|| filter_titles(black_box(&small), black_box(query)))
    });
    g.bench_function("lowercase_contains_large", |b| {
        b.iter(|| lowercase_contains(black_box(&large), black_box(query)))
    });
    g.bench_function("aho_corasick_large", |b| {
        b.iter(|| filter_titles(black_box(&large), black_box(query)))
    });
    g.finish();
}

fn bench_parse(c: &mut Criterion) {
    let line = "fanya jumla = (1 + 2) * 3 - 4 / 5 % 6";
    let script = format!("{line}\n").repeat(500);

    let mut g = c.benchmark_group("parse");
    g.bench_function("line", |b| b.iter(|| Nuru.parse(black_box(line))));
    g.bench_function("script_500_lines", |b| b.iter(|| Nuru.parse(black_box(&script))));
    g.finish();
}

criterion_group!(benches, bench_filter, bench_parse);
criterion_main!(benches);
