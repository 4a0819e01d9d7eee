//! The Context Window Problem
//!
//! Builds a document too large for the smallest model, shows which models can
//! still take it, sizes chunks to fit, and runs the first few chunks through a
//! simulated summarizer.
//!
//! ```bash
//! RUST_LOG=ctxwindow=debug cargo run --example context_window
//! ```

use std::sync::Arc;
use std::time::Duration;

use ctxwindow::process::{summarize_chunks, SimulatedSummarizer};
use ctxwindow::{split, CharHeuristic, ChunkSpec, ModelRegistry, TokenEstimator};
use tracing_subscriber::EnvFilter;

const BASE_TEXT: &str = "The context window problem is one of the most significant challenges \
    in working with large language models. A context window is the maximum number of tokens \
    a model can process in a single request. Sending more fails or truncates the input. \
    Splitting the document into overlapping chunks keeps each request inside the limit. ";

fn main() -> ctxwindow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let document = BASE_TEXT.repeat(200);
    let registry = ModelRegistry::default();
    let estimator = TokenEstimator::new(Arc::new(CharHeuristic::default()), registry.clone());
    let estimate = estimator.estimate(&document, "gpt-3.5-turbo")?;

    println!("Document statistics:");
    println!("  characters: {}", document.chars().count());
    println!("  words:      {}", document.split_whitespace().count());
    println!("  tokens:     ~{}", estimate.count);

    println!("\nModel context windows:");
    for model in &registry {
        let verdict = if model.accepts(estimate.count) { "fits" } else { "EXCEEDS" };
        println!("  {:<16} {:>7} tokens  {verdict}", model.name, model.max_tokens);
    }

    // Leave 500 tokens for the prompt and 500 for the response.
    let window = registry.limit("gpt-3.5-turbo").unwrap_or(4096);
    let spec = ChunkSpec::for_window(window, 1000, CharHeuristic::DEFAULT_CHARS_PER_TOKEN, 200)?;
    let chunks = split(&document, &spec);

    println!(
        "\nSplit with chunk_size={} chunk_overlap={}: {} chunks",
        spec.chunk_size(),
        spec.chunk_overlap(),
        chunks.len()
    );

    let summarizer = SimulatedSummarizer::with_delay(Duration::from_millis(50));
    let sample = &chunks[..chunks.len().min(3)];
    let (summaries, total_tokens) = summarize_chunks(sample, Some("demo-key"), &summarizer, |_| None);

    for (chunk, summary) in sample.iter().zip(&summaries) {
        let tokens = estimator.estimate(&chunk.text, "gpt-3.5-turbo")?.count;
        println!(
            "\n  chunk {} ({} chars, ~{} tokens in, {} tokens used)\n    {}",
            chunk.index,
            chunk.char_len(),
            tokens,
            summary.tokens_used,
            summary.text
        );
    }
    println!(
        "\nTotal tokens used for {} of {} chunks: {total_tokens}",
        sample.len(),
        chunks.len()
    );

    Ok(())
}
