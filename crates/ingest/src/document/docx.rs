use tracing::warn;

/// Extract DOCX text, one newline-joined segment per paragraph in document
/// order. A document that fails to parse yields the empty string.
pub(crate) fn extract_docx(bytes: &[u8]) -> String {
    let doc = match docx_rs::read_docx(bytes) {
        Ok(d) => d,
        Err(e) => {
            warn!("DOCX extraction failed: {e} — no text recovered");
            return String::new();
        }
    };

    let mut paragraphs: Vec<String> = Vec::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut line = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            // An empty paragraph still holds its slot in document order.
            paragraphs.push(line);
        }
    }
    paragraphs.join("\n")
}
