//! Lexical similarity scoring between the scan target and a
//! candidate. Everything here is pure computation; the scores ride
//! along in the final scan record so downstream consumers can rank
//! candidates by how convincing the lookalike is.

use crate::constants::QWERTY_ROWS;
use serde::Serialize;
use strsim::{jaro, levenshtein};

/// Similarity metrics between the target domain and one candidate.
///
/// Unless noted, metrics are computed over the first dot-label of each
/// domain, so `googIe.com` vs `google.com` compares `googIe` against
/// `google`.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct FuzzyScores {
    /// Jaro similarity over the full FQDNs, in `[0, 1]`.
    pub jaro_winkler: f64,

    /// Classic edit distance with unit costs.
    pub levenshtein: usize,

    /// `1 - d / max(|a|, |b|)`; two empty labels score `1.0`.
    pub levenshtein_normalized: f64,

    /// Count of positions where the aligned labels differ. The
    /// shorter label is padded, so length differences count as diffs.
    pub char_diff: usize,

    /// QWERTY-distance score in `[0, 1]`; `1.0` means every aligned
    /// pair sits on the same key.
    pub keyboard_proximity: f64,
}

/// Score a candidate FQDN against the target FQDN.
pub fn score(target: &str, candidate: &str) -> FuzzyScores {
    let target_label = first_label(target);
    let candidate_label = first_label(candidate);

    FuzzyScores {
        jaro_winkler: jaro(target, candidate),
        levenshtein: levenshtein(target_label, candidate_label),
        levenshtein_normalized: normalized_levenshtein(target_label, candidate_label),
        char_diff: char_diff(target_label, candidate_label),
        keyboard_proximity: keyboard_proximity(target_label, candidate_label),
    }
}

fn first_label(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

#[allow(clippy::cast_precision_loss)]
fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());

    if max_len == 0 {
        // Two empty labels are identical.
        return 1.0;
    }

    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

fn char_diff(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let len = a.len().max(b.len());

    (0..len)
        .filter(|&i| match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => x != y,
            // Positions past the shorter label always differ.
            _ => true,
        })
        .count()
}

/// Coordinate of a key on the three QWERTY letter rows.
fn key_position(c: char) -> Option<(f64, f64)> {
    QWERTY_ROWS.iter().enumerate().find_map(|(row, keys)| {
        keys.chars()
            .position(|k| k == c)
            .map(|col| (row as f64, col as f64))
    })
}

#[allow(clippy::cast_precision_loss)]
fn keyboard_proximity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let common = a.len().min(b.len());

    let mean_distance = if common == 0 {
        0.0
    } else {
        let total: f64 = (0..common)
            .map(|i| {
                if a[i] == b[i] {
                    return 0.0;
                }

                match (key_position(a[i]), key_position(b[i])) {
                    (Some((r1, c1)), Some((r2, c2))) => {
                        ((r1 - r2).powi(2) + (c1 - c2).powi(2)).sqrt() / 5.0
                    }
                    // Characters off the letter rows are maximally far.
                    _ => 1.0,
                }
            })
            .sum();

        total / common as f64
    };

    let length_penalty = 0.1 * a.len().abs_diff(b.len()) as f64;

    (1.0 - mean_distance - length_penalty).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_domains() {
        let scores = score("google.com", "google.com");

        assert_eq!(scores.jaro_winkler, 1.0);
        assert_eq!(scores.levenshtein, 0);
        assert_eq!(scores.levenshtein_normalized, 1.0);
        assert_eq!(scores.char_diff, 0);
        assert_eq!(scores.keyboard_proximity, 1.0);
    }

    #[test]
    fn test_levenshtein_is_symmetric() {
        let ab = score("google.com", "goggle.com");
        let ba = score("goggle.com", "google.com");

        assert_eq!(ab.levenshtein, ba.levenshtein);
    }

    #[test]
    fn test_homoglyph_capital_i() {
        // `googIe.com` with a capital I is one substitution away.
        let scores = score("google.com", "googIe.com");

        assert_eq!(scores.levenshtein, 1);
        assert_eq!(scores.char_diff, 1);
        assert!(scores.jaro_winkler >= 0.9);
    }

    #[test]
    fn test_normalized_levenshtein_empty_labels() {
        assert_eq!(normalized_levenshtein("", ""), 1.0);
        assert_eq!(normalized_levenshtein("", "abc"), 0.0);
    }

    #[test]
    fn test_char_diff_counts_padding() {
        assert_eq!(char_diff("abc", "abcd"), 1);
        assert_eq!(char_diff("abc", "abc"), 0);
        assert_eq!(char_diff("axc", "abc"), 1);
    }

    #[test]
    fn test_keyboard_proximity_neighbours_beat_distant_keys() {
        // `q` and `w` are adjacent; `q` and `p` sit a whole row apart.
        let near = keyboard_proximity("qoogle", "woogle");
        let far = keyboard_proximity("qoogle", "poogle");

        assert!(near > far);
    }

    #[test]
    fn test_keyboard_proximity_length_penalty() {
        let same = keyboard_proximity("google", "google");
        let longer = keyboard_proximity("google", "googles");

        assert_eq!(same, 1.0);
        assert!((longer - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_keyboard_proximity_unknown_characters() {
        // Digits are off the letter rows and score a full unit.
        assert!(keyboard_proximity("g0ogle", "google") < 1.0);
    }
}
