//! Basic Sliding-Window Chunking
//!
//! The minimal example: cut a document into overlapping windows.
//!
//! ```bash
//! cargo run --example 01_basic_chunking
//! ```

use ctxwindow::{Chunker, FixedChunker};

fn main() -> ctxwindow::Result<()> {
    let document = "Machine learning models learn patterns from data. \
        They generalize these patterns to make predictions. \
        This is fundamentally different from traditional programming. \
        Deep learning extends this with multiple hidden layers. \
        Each layer learns increasingly abstract representations.";

    // 80 characters per chunk, 20 repeated between neighbours
    let chunker = FixedChunker::new(80, 20)?;
    let chunks = chunker.chunk(document);

    println!("Document: {} chars", document.chars().count());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!(
            "[{}] chars {:>3}..{:<3} \"{}\"",
            chunk.index, chunk.char_start, chunk.char_end, chunk.text
        );
    }

    // An overlap that reaches the size is refused instead of looping forever.
    if let Err(err) = FixedChunker::new(80, 80) {
        println!("\nRejected: {err}");
    }

    Ok(())
}
