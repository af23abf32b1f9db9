use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use regex::Regex;
use seqrex::PatternBuilder;

// Compares this engine's element-at-a-time matching against the regex
// crate's specialized byte/char engine, on `char`-instantiated patterns so
// the comparison is apples-to-apples on the same input text.
// Run with: cargo bench --bench seqrex_benchmark

fn literal_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal_comparison");

    let text = "the quick brown fox jumps over the lazy dog";
    let chars: Vec<char> = text.chars().collect();

    group.bench_function("seqrex_literal", |b| {
        let pattern = PatternBuilder::<char>::new().token_eq('f').token_eq('o').token_eq('x').build();
        b.iter(|| {
            let mut m = pattern.matcher(black_box(&chars));
            black_box(m.find())
        });
    });

    group.bench_function("regex_literal", |b| {
        let re = Regex::new("fox").unwrap();
        b.iter(|| black_box(re.is_match(black_box(text))));
    });

    group.finish();
}

fn quantifier_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantifier_comparison");

    let text = "order #12345 costs $67.89";
    let chars: Vec<char> = text.chars().collect();

    group.bench_function("seqrex_digit_run", |b| {
        let pattern = PatternBuilder::<char>::new()
            .token(|c: &char| c.is_ascii_digit())
            .one_or_more()
            .unwrap()
            .build();
        b.iter(|| {
            let mut m = pattern.matcher(black_box(&chars));
            let mut count = 0;
            while m.find() {
                count += 1;
            }
            black_box(count)
        });
    });

    group.bench_function("regex_digit_run", |b| {
        let re = Regex::new(r"\d+").unwrap();
        b.iter(|| black_box(re.find_iter(black_box(text)).count()));
    });

    group.finish();
}

fn scaling_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling_comparison");

    for len in [16usize, 256, 4096] {
        let text: String = "ab".repeat(len / 2 + 1);
        let chars: Vec<char> = text.chars().take(len).collect();

        group.bench_with_input(BenchmarkId::new("seqrex", len), &chars, |b, chars| {
            let pattern = PatternBuilder::<char>::new()
                .group(|g| g.token_eq('a').token_eq('b'))
                .one_or_more()
                .unwrap()
                .build();
            b.iter(|| {
                let mut m = pattern.matcher(black_box(chars));
                black_box(m.find())
            });
        });

        let slice: String = chars.iter().collect();
        group.bench_with_input(BenchmarkId::new("regex", len), &slice, |b, slice| {
            let re = Regex::new("(ab)+").unwrap();
            b.iter(|| black_box(re.is_match(black_box(slice))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    literal_comparison,
    quantifier_comparison,
    scaling_comparison
);
criterion_main!(benches);
