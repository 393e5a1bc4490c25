//! Format-aware text extraction.
//!
//! Extraction never fails: malformed content degrades to whatever partial
//! text is recoverable (an empty string at worst), and unknown extensions
//! fall back to best-effort text decoding. Downstream decides what zero
//! extracted text means for a document.

mod docx;
mod pdf;
mod txt;

/// The closed set of document families the extractor understands.
///
/// Selected from the filename extension alone; the declared type is trusted
/// and decode errors are absorbed per format rather than re-dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// txt / md / log: decoded as UTF-8, invalid sequences replaced.
    PlainText,
    /// Page-oriented: text per page, pages joined with newlines.
    Pdf,
    /// Paragraph-oriented: text per paragraph, joined with newlines.
    Docx,
    /// Anything else: best-effort text decode.
    Fallback,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        match ext.as_str() {
            "txt" | "md" | "log" => DocumentKind::PlainText,
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            _ => DocumentKind::Fallback,
        }
    }
}

/// Extract raw text from `bytes` according to `kind`.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> String {
    match kind {
        DocumentKind::PlainText | DocumentKind::Fallback => txt::decode_text(bytes),
        DocumentKind::Pdf => pdf::extract_pdf(bytes),
        DocumentKind::Docx => docx::extract_docx(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_known_extensions() {
        assert_eq!(DocumentKind::from_filename("notes.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename("README.md"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename("server.log"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename("paper.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("report.docx"), DocumentKind::Docx);
    }

    #[test]
    fn unknown_extension_falls_back() {
        assert_eq!(DocumentKind::from_filename("archive.xyz"), DocumentKind::Fallback);
        assert_eq!(DocumentKind::from_filename("no_extension"), DocumentKind::Fallback);
    }

    #[test]
    fn fallback_decodes_as_text() {
        let text = extract_text(b"plain enough", DocumentKind::Fallback);
        assert_eq!(text, "plain enough");
    }

    #[test]
    fn unreadable_docx_yields_empty_text() {
        // Not a zip archive at all; extraction absorbs the failure.
        let text = extract_text(b"definitely not a docx", DocumentKind::Docx);
        assert_eq!(text, "");
    }

    #[test]
    fn unreadable_pdf_yields_empty_text() {
        let text = extract_text(b"%PDF-garbage", DocumentKind::Pdf);
        assert_eq!(text, "");
    }
}
