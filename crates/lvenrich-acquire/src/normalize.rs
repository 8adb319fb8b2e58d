use unicode_normalization::UnicodeNormalization;

/// Normalize scraped cell text to NFC form, so names that differ only in
/// accent composition compare equal.
pub fn normalize_text(input: &str) -> String {
    input.nfc().collect()
}

/// Join text fragments the way the table cells are read: each fragment
/// trimmed, empty fragments dropped, the rest concatenated without a separator.
pub fn join_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let joined: String = fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    normalize_text(&joined)
}
