/// Normalize lyric text for matching: lower-case, strip bracketed structural
/// tags (`[Verse]`, `(ad-lib)`), strip punctuation while keeping letters and
/// digits (Cyrillic and Latin observed in the wild), collapse whitespace.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let untagged = strip_bracketed(&strip_bracketed(&lowered, '[', ']'), '(', ')');

    let mut out = String::with_capacity(untagged.len());
    let mut pending_space = false;
    for c in untagged.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else if c.is_whitespace() {
            pending_space = true;
        }
        // Punctuation is dropped without acting as a separator, so
        // "don't" stays one token while "world,  foo" still splits.
    }
    out
}

/// Normalize and split into comparable tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Remove complete `open...close` spans. A stray opener or closer without a
/// partner is left for the punctuation filter, so it never swallows lyric
/// text that follows it.
fn strip_bracketed(text: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after = &rest[start + open.len_utf8()..];
        match after.find(close) {
            Some(end) => rest = &after[end + close.len_utf8()..],
            None => {
                out.push_str(after);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
