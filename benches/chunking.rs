//! Benchmarks for sliding-window chunking and token estimation.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ctxwindow::{
    CharHeuristic, Chunker, FixedChunker, ModelRegistry, TokenEstimator, WordHeuristic,
};

fn sample_text(size: usize) -> String {
    let sentences = [
        "The quick brown fox jumps over the lazy dog. ",
        "Pack my box with five dozen liquor jugs. ",
        "How vexingly quick daft zebras jump! ",
        "Der Bäcker bäckt frische Brötchen. ",
        "東京は日本の首都です。",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.chars().count() < size {
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text.chars().take(size).collect()
}

fn bench_fixed_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_chunker");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);
        let chunker = FixedChunker::new(1000, 200).unwrap();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("fixed", size), &text, |b, text| {
            b.iter(|| chunker.chunk(black_box(text)))
        });
    }

    group.finish();
}

fn bench_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_estimator");
    let text = sample_text(100_000);
    group.throughput(Throughput::Bytes(text.len() as u64));

    let chars = TokenEstimator::new(Arc::new(CharHeuristic::default()), ModelRegistry::default());
    group.bench_function("chars", |b| {
        b.iter(|| chars.estimate(black_box(&text), "gpt-4"))
    });

    let words = TokenEstimator::new(Arc::new(WordHeuristic), ModelRegistry::default());
    group.bench_function("words", |b| {
        b.iter(|| words.estimate(black_box(&text), "gpt-4"))
    });

    group.finish();
}

criterion_group!(benches, bench_fixed_chunker, bench_estimators);
criterion_main!(benches);
