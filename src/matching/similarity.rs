/// Levenshtein edit distance with unit costs, computed over Unicode scalar values.
///
/// Builds the full `(len(a) + 1) x (len(b) + 1)` matrix.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (rows, cols) = (a.len() + 1, b.len() + 1);

    let mut matrix = vec![vec![0usize; cols]; rows];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..cols {
        matrix[0][j] = j;
    }

    for i in 1..rows {
        for j in 1..cols {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let deletion = matrix[i - 1][j] + 1;
            let insertion = matrix[i][j - 1] + 1;
            let substitution = matrix[i - 1][j - 1] + cost;
            matrix[i][j] = deletion.min(insertion).min(substitution);
        }
    }

    matrix[rows - 1][cols - 1]
}

/// Similarity in percent: `round((maxLen - distance) / maxLen * 100)`.
/// Two empty strings are identical (100).
pub fn similarity(a: &str, b: &str) -> u8 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }

    let distance = distance(a, b);
    let ratio = (max_len - distance) as f64 / max_len as f64;
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identity() {
        for s in ["", "anna", "müller", "anna muster"] {
            assert_eq!(distance(s, s), 0);
            assert_eq!(similarity(s, s), 100);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [("kitten", "sitting"), ("anna", "hanna"), ("", "abc"), ("schmidt", "schmitt")];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a));
        }
    }

    #[test]
    fn test_classic_distances() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn test_similarity_edges() {
        assert_eq!(similarity("", ""), 100);
        assert_eq!(similarity("abc", ""), 0);
        assert_eq!(similarity("", "abc"), 0);
    }

    #[test]
    fn test_similarity_rounds() {
        // one edit over 11 characters: 10 / 11 = 90.9%
        assert_eq!(similarity("anna muster", "anna mustar"), 91);
        // three edits over 7 characters: 4 / 7 = 57.1%
        assert_eq!(similarity("kitten", "sitting"), 57);
    }

    #[test]
    fn test_umlauts_count_as_single_characters() {
        assert_eq!(distance("müller", "muller"), 1);
        assert_eq!(similarity("müller", "müller"), 100);
    }

    #[test]
    fn test_case_sensitive_on_raw_input() {
        assert_eq!(distance("Anna", "anna"), 1);
    }
}
