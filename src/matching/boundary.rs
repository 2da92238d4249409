use crate::types::TimestampedWord;

/// Gap size that ends a phrase during expansion.
const PHRASE_GAP_THRESHOLD_S: f64 = 0.5;
/// Slack applied when collecting words for a time range.
const RANGE_SLACK_S: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct BoundaryOptions {
    pub snap_to_word_start: bool,
    pub snap_to_word_end: bool,
    /// Extend the snapped range across gaps below the phrase threshold to
    /// natural phrase boundaries.
    pub expand_to_phrase: bool,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            snap_to_word_start: true,
            snap_to_word_end: true,
            expand_to_phrase: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryAlignment {
    /// Rounded to 10 ms: downstream range-based operations (audio section
    /// replacement) key on quantized times.
    pub start_time_s: f64,
    pub end_time_s: f64,
    pub start_word_index: Option<usize>,
    pub end_word_index: Option<usize>,
}

/// Snap an arbitrary time range onto exact word boundaries. A boundary that
/// falls in a gap snaps to whichever neighboring word is closer.
pub fn align_section_boundaries(
    start_time_s: f64,
    end_time_s: f64,
    aligned_words: &[TimestampedWord],
    options: &BoundaryOptions,
) -> BoundaryAlignment {
    if aligned_words.is_empty() {
        return BoundaryAlignment {
            start_time_s: round_to_10ms(start_time_s),
            end_time_s: round_to_10ms(end_time_s),
            start_word_index: None,
            end_word_index: None,
        };
    }

    let mut start_word_index: Option<usize> = None;
    let mut end_word_index: Option<usize> = None;
    let mut adjusted_start = start_time_s;
    let mut adjusted_end = end_time_s;

    // First word whose span ends at or after the requested start.
    for (i, word) in aligned_words.iter().enumerate() {
        if word.end_s >= start_time_s {
            if options.snap_to_word_start {
                if word.start_s <= start_time_s {
                    start_word_index = Some(i);
                    adjusted_start = word.start_s;
                } else {
                    let prev = i.checked_sub(1).map(|p| &aligned_words[p]);
                    match prev {
                        Some(prev_word)
                            if start_time_s - prev_word.end_s < word.start_s - start_time_s =>
                        {
                            start_word_index = Some(i - 1);
                            adjusted_start = prev_word.start_s;
                        }
                        _ => {
                            start_word_index = Some(i);
                            adjusted_start = word.start_s;
                        }
                    }
                }
            }
            break;
        }
    }

    // Symmetric scan from the back for the end boundary.
    for (i, word) in aligned_words.iter().enumerate().rev() {
        if word.start_s <= end_time_s {
            if options.snap_to_word_end {
                if word.end_s >= end_time_s {
                    end_word_index = Some(i);
                    adjusted_end = word.end_s;
                } else {
                    let next = aligned_words.get(i + 1);
                    match next {
                        Some(next_word)
                            if next_word.start_s - end_time_s < end_time_s - word.end_s =>
                        {
                            end_word_index = Some(i + 1);
                            adjusted_end = next_word.end_s;
                        }
                        _ => {
                            end_word_index = Some(i);
                            adjusted_end = word.end_s;
                        }
                    }
                }
            }
            break;
        }
    }

    if options.expand_to_phrase {
        if let (Some(mut start_idx), Some(mut end_idx)) = (start_word_index, end_word_index) {
            while start_idx > 0 {
                let gap =
                    aligned_words[start_idx].start_s - aligned_words[start_idx - 1].end_s;
                if gap > PHRASE_GAP_THRESHOLD_S {
                    break;
                }
                start_idx -= 1;
                adjusted_start = aligned_words[start_idx].start_s;
            }
            while end_idx + 1 < aligned_words.len() {
                let gap = aligned_words[end_idx + 1].start_s - aligned_words[end_idx].end_s;
                if gap > PHRASE_GAP_THRESHOLD_S {
                    break;
                }
                end_idx += 1;
                adjusted_end = aligned_words[end_idx].end_s;
            }
            start_word_index = Some(start_idx);
            end_word_index = Some(end_idx);
        }
    }

    BoundaryAlignment {
        start_time_s: round_to_10ms(adjusted_start),
        end_time_s: round_to_10ms(adjusted_end),
        start_word_index,
        end_word_index,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeLyrics {
    pub text: String,
    pub words: Vec<TimestampedWord>,
}

/// Collect the words fully inside `[start_time_s, end_time_s]` (with a small
/// slack for alignment noise) and their joined text.
pub fn extract_time_range(
    start_time_s: f64,
    end_time_s: f64,
    aligned_words: &[TimestampedWord],
) -> RangeLyrics {
    let words: Vec<TimestampedWord> = aligned_words
        .iter()
        .filter(|w| w.start_s >= start_time_s - RANGE_SLACK_S && w.end_s <= end_time_s + RANGE_SLACK_S)
        .cloned()
        .collect();

    let text = words
        .iter()
        .map(|w| w.text.replace('\n', " "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    RangeLyrics { text, words }
}

fn round_to_10ms(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
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

    fn sample_words() -> Vec<TimestampedWord> {
        vec![
            word("one", 0.0, 0.4),
            word("two", 0.5, 0.9),
            word("three", 1.0, 1.4),
            word("four", 2.5, 2.9),
        ]
    }

    #[test]
    fn snaps_start_inside_word_to_word_start() {
        let words = sample_words();
        let aligned =
            align_section_boundaries(0.7, 1.2, &words, &BoundaryOptions::default());
        assert_eq!(aligned.start_time_s, 0.5);
        assert_eq!(aligned.start_word_index, Some(1));
        assert_eq!(aligned.end_time_s, 1.4);
        assert_eq!(aligned.end_word_index, Some(2));
    }

    #[test]
    fn gap_start_snaps_to_closer_neighbor() {
        let words = sample_words();
        // 0.42 is 0.02 after "one" ends and 0.08 before "two" starts.
        let aligned =
            align_section_boundaries(0.42, 1.2, &words, &BoundaryOptions::default());
        assert_eq!(aligned.start_word_index, Some(0));
        assert_eq!(aligned.start_time_s, 0.0);
    }

    #[test]
    fn gap_end_snaps_to_closer_neighbor() {
        let words = sample_words();
        // 2.45 is 0.05 before "four" starts and 1.05 after "three" ends.
        let aligned =
            align_section_boundaries(0.0, 2.45, &words, &BoundaryOptions::default());
        assert_eq!(aligned.end_word_index, Some(3));
        assert_eq!(aligned.end_time_s, 2.9);
    }

    #[test]
    fn phrase_expansion_crosses_small_gaps_only() {
        let words = sample_words();
        let options = BoundaryOptions {
            expand_to_phrase: true,
            ..BoundaryOptions::default()
        };
        // Snapped span starts at "two"; expansion walks back over the 0.1 s
        // gap to "one" but never forward across the 1.1 s gap to "four".
        let aligned = align_section_boundaries(0.6, 1.2, &words, &options);
        assert_eq!(aligned.start_word_index, Some(0));
        assert_eq!(aligned.start_time_s, 0.0);
        assert_eq!(aligned.end_word_index, Some(2));
        assert_eq!(aligned.end_time_s, 1.4);
    }

    #[test]
    fn empty_words_round_and_pass_through() {
        let aligned = align_section_boundaries(0.123, 4.567, &[], &BoundaryOptions::default());
        assert_eq!(aligned.start_time_s, 0.12);
        assert_eq!(aligned.end_time_s, 4.57);
        assert_eq!(aligned.start_word_index, None);
        assert_eq!(aligned.end_word_index, None);
    }

    #[test]
    fn times_are_rounded_to_10ms() {
        let words = vec![word("x", 0.333_33, 0.666_66)];
        let aligned = align_section_boundaries(0.4, 0.5, &words, &BoundaryOptions::default());
        assert_eq!(aligned.start_time_s, 0.33);
        assert_eq!(aligned.end_time_s, 0.67);
    }

    #[test]
    fn returned_range_contains_a_word_span() {
        let words = sample_words();
        for (s, e) in [(0.0, 3.0), (0.45, 0.46), (1.1, 2.6), (2.4, 3.2)] {
            let aligned = align_section_boundaries(s, e, &words, &BoundaryOptions::default());
            let contained = words.iter().any(|w| {
                aligned.start_time_s <= w.start_s + 1e-9 && w.end_s <= aligned.end_time_s + 1e-9
            });
            assert!(contained, "no word span inside range for input ({s}, {e})");
        }
    }

    #[test]
    fn extract_range_honors_slack() {
        let words = sample_words();
        let range = extract_time_range(0.5, 1.4, &words);
        assert_eq!(range.words.len(), 2);
        assert_eq!(range.text, "two three");

        let with_slack = extract_time_range(0.55, 1.35, &words);
        // 0.1 s slack still admits both boundary words.
        assert_eq!(with_slack.words.len(), 2);
    }

    #[test]
    fn extract_range_cleans_line_breaks() {
        let words = vec![word("hello\n", 0.0, 0.4), word("world", 0.5, 0.9)];
        let range = extract_time_range(0.0, 1.0, &words);
        assert_eq!(range.text, "hello world");
    }
}
