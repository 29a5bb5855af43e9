//! Edit distance and similarity scoring

/// Levenshtein distance between `a` and `b`, counted in characters.
///
/// Keeps the full (len(b)+1) x (len(a)+1) table.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, cell) in matrix[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in matrix.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=b.len() {
        for i in 1..=a.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            matrix[j][i] = (matrix[j][i - 1] + 1)
                .min(matrix[j - 1][i] + 1)
                .min(matrix[j - 1][i - 1] + cost);
        }
    }

    matrix[b.len()][a.len()]
}

/// Percentage similarity derived from a distance and the two string lengths.
///
/// Two empty strings are 100% similar.
pub fn similarity(distance: usize, len1: usize, len2: usize) -> f64 {
    let max_len = len1.max(len2);
    if max_len == 0 {
        return 100.0;
    }
    (1.0 - distance as f64 / max_len as f64) * 100.0
}
