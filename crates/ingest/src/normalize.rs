//! Text normalization between extraction and chunking.

/// Clean extracted text for chunking. Pure and idempotent.
///
/// Passes, in order: NUL bytes become spaces, runs of spaces/tabs collapse
/// to a single space, runs of three or more newlines collapse to exactly
/// two, and the whole text is trimmed. NUL replacement runs first so the
/// substituted spaces participate in collapsing.
pub fn normalize(raw: &str) -> String {
    let no_nul: String = raw
        .chars()
        .map(|c| if c == '\0' { ' ' } else { c })
        .collect();
    let collapsed = collapse_horizontal(&no_nul);
    let collapsed = collapse_blank_runs(&collapsed);
    collapsed.trim().to_string()
}

/// Collapse every run of spaces and tabs into a single space.
fn collapse_horizontal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c == ' ' || c == '\t' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Collapse runs of three or more newlines into exactly two, keeping
/// intentional paragraph breaks.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0usize;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(c);
            }
        } else {
            newlines = 0;
            out.push(c);
        }
    }
    out
}
