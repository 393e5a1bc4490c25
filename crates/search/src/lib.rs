//! OpenSearch collaborator: index bootstrap, idempotent bulk upsert of
//! chunk records, and the match-query search surface.

pub mod client;

pub use client::{SearchClient, SearchError, SearchHit};
