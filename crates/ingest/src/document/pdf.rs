use tracing::warn;

/// Extract PDF text, one newline-joined segment per page.
///
/// A page with no extractable text contributes an empty segment in place,
/// keeping page order intact. A PDF that fails to parse at all yields the
/// empty string; extraction failure never fails the document.
pub(crate) fn extract_pdf(bytes: &[u8]) -> String {
    let text = match pdf_extract::extract_text_from_mem(bytes) {
        Ok(t) => t,
        Err(e) => {
            warn!("PDF text extraction failed: {e} — no text recovered");
            return String::new();
        }
    };
    join_pages(&text)
}

/// pdf-extract returns the whole document as one string with form feed
/// characters (\x0C) separating pages. Re-join page segments with newlines,
/// preserving empty segments for pages that yielded nothing.
fn join_pages(raw: &str) -> String {
    if raw.contains('\x0C') {
        raw.split('\x0C').collect::<Vec<_>>().join("\n")
    } else {
        raw.to_string()
    }
}
