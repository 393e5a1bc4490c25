//! The ingestion pipeline: extract, normalize, and chunk one document's
//! bytes into the chunk records the index consumes.

use kbgate_core::{chunk_id, ChunkRecord, DocumentRecord};
use tracing::debug;

use crate::chunker::{split_chunks, ChunkParams};
use crate::document::{extract_text, DocumentKind};
use crate::normalize::normalize;

/// Turn one document's raw bytes into its ordered chunk records.
///
/// Deterministic: the same bytes and parameters always produce the same
/// records with the same derived ids, which is what lets the index
/// collaborator upsert instead of duplicate. A document whose text
/// normalizes to nothing produces zero records, which is not an error.
pub fn chunk_records(
    doc: &DocumentRecord,
    bytes: &[u8],
    params: &ChunkParams,
) -> Vec<ChunkRecord> {
    let kind = DocumentKind::from_filename(&doc.filename);
    let raw = extract_text(bytes, kind);
    let text = normalize(&raw);
    let chunks = split_chunks(&text, params);
    debug!(
        file_id = %doc.file_id,
        filename = %doc.filename,
        chunks = chunks.len(),
        "document chunked"
    );

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, content)| ChunkRecord {
            chunk_id: chunk_id(doc.file_id, i),
            file_id: doc.file_id,
            filename: doc.filename.clone(),
            chunk_index: i,
            content,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_doc(filename: &str) -> DocumentRecord {
        DocumentRecord {
            file_id: Uuid::new_v4(),
            filename: filename.to_string(),
            path: std::path::PathBuf::from("unused"),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn records_carry_positional_identity() {
        let doc = make_doc("notes.txt");
        let text: String = (0..50).map(|i| format!("word{i} ")).collect();
        let params = ChunkParams::new(40, 10).unwrap();

        let records = chunk_records(&doc, text.as_bytes(), &params);
        assert!(records.len() > 1);
        for (i, rec) in records.iter().enumerate() {
            assert_eq!(rec.chunk_index, i);
            assert_eq!(rec.chunk_id, format!("{}:{}", doc.file_id, i));
            assert_eq!(rec.file_id, doc.file_id);
            assert_eq!(rec.filename, "notes.txt");
        }
    }

    #[test]
    fn reingestion_reproduces_identical_records() {
        let doc = make_doc("stable.md");
        let bytes = b"# Title\n\nSame bytes, same chunks, same ids.";
        let params = ChunkParams::new(20, 5).unwrap();

        let first = chunk_records(&doc, bytes, &params);
        let second = chunk_records(&doc, bytes, &params);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_document_produces_no_records() {
        let doc = make_doc("empty.txt");
        let params = ChunkParams::new(800, 120).unwrap();
        assert!(chunk_records(&doc, b"", &params).is_empty());
        assert!(chunk_records(&doc, b"  \n\n  ", &params).is_empty());
    }

    #[test]
    fn extraction_noise_is_normalized_before_chunking() {
        let doc = make_doc("noisy.log");
        let params = ChunkParams::new(800, 120).unwrap();
        let records = chunk_records(&doc, b"a\x00b   c\n\n\n\nd  ", &params);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "a b c\n\nd");
    }
}
