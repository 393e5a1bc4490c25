//! Fixed-window chunking with overlap.
//!
//! Splits normalized text into an ordered sequence of character windows of
//! at most `chunk_size`, each window re-including the last `overlap`
//! characters of the previous one. Emission order is the sole basis for
//! chunk identity, so the same text and parameters always reproduce the
//! same sequence.

use thiserror::Error;


/// Validated window parameters.
///
/// Construction enforces `0 < chunk_size` and `overlap < chunk_size`; with
/// that invariant the chunking cursor strictly advances and the walk always
/// terminates.
#[derive(Debug, Clone, Copy)]
pub struct ChunkParams {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkParams {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkParamsError> {
        if chunk_size == 0 || overlap >= chunk_size {
            return Err(ChunkParamsError { chunk_size, overlap });
        }
        Ok(Self { chunk_size, overlap })
    }
}

/// Rejected chunking configuration. Fatal to the request that carried it,
/// since chunking with these values would degenerate or never terminate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid chunking parameters: chunk_size={chunk_size}, overlap={overlap} (requires chunk_size > 0 and overlap < chunk_size)")]
pub struct ChunkParamsError {
    pub chunk_size: usize,
    pub overlap: usize,
}

/// Split `text` into overlapping windows of at most `chunk_size` characters.
///
/// Windows are measured in characters, not bytes, so multi-byte text never
/// splits inside a code point. Empty or whitespace-only input yields no
/// chunks; input that fits a single window yields exactly one.
pub fn split_chunks(text: &str, params: &ChunkParams) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + params.chunk_size).min(n);
        chunks.push(chars[start..end].iter().collect());
        if end == n {
            break;
        }
        start = end - params.overlap;
    }

    chunks
}
