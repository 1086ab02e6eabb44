//! Fuzzy string matching for evidence verification.
//!
//! Snippets quoted by the generation service rarely match the extracted
//! page text byte-for-byte: OCR noise, line-wrap artifacts, and minor
//! punctuation drift are all common. Matching is therefore done with a
//! normalized edit-distance similarity and a sliding-window containment
//! test rather than exact substring search.

/// Normalized Levenshtein similarity in `[0.0, 1.0]`.
///
/// Case-insensitive and trimmed of surrounding whitespace. Identical
/// normalized strings return exactly `1.0`. Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    let s1: Vec<char> = a.trim().to_lowercase().chars().collect();
    let s2: Vec<char> = b.trim().to_lowercase().chars().collect();
    if s1 == s2 {
        return 1.0;
    }
    let max_len = s1.len().max(s2.len()).max(1);
    let dist = levenshtein(&s1, &s2);
    1.0 - dist as f64 / max_len as f64
}

/// Fuzzy containment: is `needle` present in `haystack`, allowing for
/// minor textual noise?
///
/// Returns true immediately on an exact case-insensitive substring match.
/// Otherwise slides a window of `clamp(needle_len + 20%, 10, 120)` chars
/// across the haystack and accepts any window whose similarity to the
/// needle meets `threshold`. An empty needle never matches.
pub fn fuzzy_contains(haystack: &str, needle: &str, threshold: f64) -> bool {
    let h = haystack.to_lowercase();
    let n = needle.trim().to_lowercase();
    if n.is_empty() {
        return false;
    }
    if h.contains(&n) {
        return true;
    }

    let h_chars: Vec<char> = h.chars().collect();
    let n_len = n.chars().count();
    let window = (n_len + n_len.div_ceil(5)).clamp(10, 120);
    if h_chars.len() < window {
        return false;
    }
    for start in 0..=(h_chars.len() - window) {
        let chunk: String = h_chars[start..start + window].iter().collect();
        if similarity(&chunk, &n) >= threshold {
            return true;
        }
    }
    false
}

/// Edit distance between two char sequences (two-row dynamic program).
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_similarity_identical() {
        assert_eq!(similarity("Alpha beta", "Alpha beta"), 1.0);
        assert_eq!(similarity("  ALPHA ", "alpha"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_similarity_disjoint_is_low() {
        assert!(similarity("aaaa", "zzzz") < 0.1);
    }

    #[test]
    fn test_fuzzy_contains_exact_substring() {
        assert!(fuzzy_contains("Alpha beta gamma", "beta", 0.9));
        assert!(fuzzy_contains("Alpha beta gamma", "BETA GAMMA", 0.9));
    }

    #[test]
    fn test_fuzzy_contains_empty_needle() {
        assert!(!fuzzy_contains("Alpha beta gamma", "", 0.0));
        assert!(!fuzzy_contains("", "", 0.9));
    }

    #[test]
    fn test_fuzzy_contains_near_match_in_long_snippet() {
        // One character of OCR drift in a window-sized snippet
        let span = "the cell membrane regulates transport of ions and molecules while the nucleus stores genetic material for replication";
        let haystack = format!("{span} in all organisms");
        let needle = span.replace("regulates", "regulatez");
        assert!(fuzzy_contains(&haystack, &needle, 0.9));
    }

    #[test]
    fn test_fuzzy_contains_short_drifting_snippet_fails() {
        // Below the minimum window a non-substring needle cannot reach
        // the threshold, however close it is.
        assert!(!fuzzy_contains("Alpha beta gamma", "betta", 0.9));
    }

    #[test]
    fn test_fuzzy_contains_rejects_absent_text() {
        assert!(!fuzzy_contains("Alpha beta gamma", "Zeta", 0.9));
    }

    #[test]
    fn test_fuzzy_contains_haystack_shorter_than_window() {
        assert!(!fuzzy_contains("short", "something entirely different", 0.9));
    }

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein(&['a', 'b'], &['a', 'b']), 0);
        assert_eq!(levenshtein(&['a'], &[]), 1);
        let kitten: Vec<char> = "kitten".chars().collect();
        let sitting: Vec<char> = "sitting".chars().collect();
        assert_eq!(levenshtein(&kitten, &sitting), 3);
    }

    proptest! {
        #[test]
        fn prop_similarity_self_is_one(s in ".{0,40}") {
            prop_assert_eq!(similarity(&s, &s), 1.0);
        }

        #[test]
        fn prop_similarity_symmetric(a in ".{0,30}", b in ".{0,30}") {
            prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        }

        #[test]
        fn prop_similarity_bounded(a in ".{0,30}", b in ".{0,30}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }
}
