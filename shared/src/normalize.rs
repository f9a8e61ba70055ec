use unicode_normalization::UnicodeNormalization;

/// Canonical lookup key for a municipality name: NFD decomposition,
/// combining marks stripped, uppercased, trimmed.
///
/// Idempotent: normalizing an already-normalized name is a no-op.
pub fn normalize_name(name: &str) -> String {
    strip_accents(name.trim()).to_uppercase()
}

fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_mark(*c)).collect()
}

fn is_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
