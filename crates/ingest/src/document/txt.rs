/// Decode bytes as UTF-8, replacing invalid sequences instead of failing.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}
