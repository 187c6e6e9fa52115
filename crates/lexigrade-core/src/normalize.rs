//! Answer normalization.

/// Normalize an answer for comparison.
///
/// Lower-cases the input, collapses every run of whitespace to a single
/// space and trims both ends. Punctuation and letters are kept as-is.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
