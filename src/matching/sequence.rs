use crate::matching::fuzzy::{fuzzy_word_match, DEFAULT_FUZZY_THRESHOLD};
use crate::types::TimestampedWord;

/// Score a window of section tokens against the aligned words starting at
/// `start_index`. Position-sensitive: pairs are compared index-for-index, so
/// word order matters. Returns 0.0 when the window overruns either array.
pub fn score_sequence(
    section_words: &[String],
    aligned_words: &[TimestampedWord],
    start_index: usize,
    window: usize,
) -> f64 {
    if window == 0 || start_index + window > aligned_words.len() {
        return 0.0;
    }

    let mut matches = 0usize;
    for i in 0..window.min(section_words.len()) {
        let section_word = &section_words[i];
        let aligned_word = &aligned_words[start_index + i].text;
        if fuzzy_word_match(section_word, aligned_word, DEFAULT_FUZZY_THRESHOLD) {
            matches += 1;
        }
    }

    matches as f64 / window as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start_s: f64, end_s: f64) -> TimestampedWord {
        TimestampedWord {
            text: text.to_string(),
            start_s,
            end_s,
            alignment_success: true,
            alignment_prob: 1.0,
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn perfect_window_scores_one() {
        let aligned = vec![word("hello", 0.0, 0.4), word("world", 0.5, 0.9)];
        let section = tokens(&["hello", "world"]);
        assert_eq!(score_sequence(&section, &aligned, 0, 2), 1.0);
    }

    #[test]
    fn out_of_bounds_window_scores_zero() {
        let aligned = vec![word("hello", 0.0, 0.4)];
        let section = tokens(&["hello", "world"]);
        assert_eq!(score_sequence(&section, &aligned, 0, 2), 0.0);
        assert_eq!(score_sequence(&section, &aligned, 1, 1), 0.0);
    }

    #[test]
    fn partial_match_is_fractional() {
        let aligned = vec![
            word("hello", 0.0, 0.4),
            word("there", 0.5, 0.9),
            word("world", 1.0, 1.4),
        ];
        let section = tokens(&["hello", "big", "world"]);
        let score = score_sequence(&section, &aligned, 0, 3);
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn order_matters() {
        let aligned = vec![word("world", 0.0, 0.4), word("hello", 0.5, 0.9)];
        let section = tokens(&["hello", "world"]);
        assert_eq!(score_sequence(&section, &aligned, 0, 2), 0.0);
    }

    #[test]
    fn window_larger_than_section_divides_by_window() {
        let aligned = vec![
            word("hello", 0.0, 0.4),
            word("world", 0.5, 0.9),
            word("again", 1.0, 1.4),
        ];
        let section = tokens(&["hello", "world"]);
        // Two matched pairs over a window of three.
        let score = score_sequence(&section, &aligned, 0, 3);
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }
}
