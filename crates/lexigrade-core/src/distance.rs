//! Levenshtein edit distance.

/// Compute the Levenshtein distance between `a` and `b`.
///
/// Counts the minimum number of single-character insertions, deletions or
/// substitutions turning `a` into `b`. Characters are Unicode scalar values.
///
/// Uses the full `(len(b)+1) x (len(a)+1)` dynamic-programming table, where
/// cell `[i][j]` holds the distance between `b[..i]` and `a[..j]`. Time and
/// space are `O(len(a) * len(b))`, which is fine for vocabulary-sized input.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let width = a.len() + 1;
    let mut table = vec![0usize; (b.len() + 1) * width];

    for (j, cell) in table.iter_mut().take(width).enumerate() {
        *cell = j;
    }
    for i in 0..=b.len() {
        table[i * width] = i;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            let cell = i * width + j;
            table[cell] = if b[i - 1] == a[j - 1] {
                table[cell - width - 1]
            } else {
                1 + table[cell - width - 1]
                    .min(table[cell - 1])
                    .min(table[cell - width])
            };
        }
    }

    table[b.len() * width + a.len()]
}
