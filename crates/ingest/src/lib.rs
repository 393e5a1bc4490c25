//! Document ingestion: format-aware text extraction, normalization, and
//! fixed-window chunking with overlap.
//!
//! Everything here is a pure, synchronous transformation over in-memory
//! bytes (no I/O, no shared state), so distinct documents can be processed
//! in parallel without coordination.

pub mod chunker;
pub mod document;
pub mod normalize;
pub mod pipeline;

pub use chunker::{split_chunks, ChunkParams, ChunkParamsError};
pub use document::{extract_text, DocumentKind};
pub use normalize::normalize;
pub use pipeline::chunk_records;
