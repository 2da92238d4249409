use crate::error::SyncError;
use crate::matching::normalize::tokenize;
use crate::matching::sequence::score_sequence;
use crate::types::{MatchDetails, SectionMatch, TimestampedWord};

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.4;

const MAX_WINDOW_SIZE: usize = 5;
/// Early-exit score for the sliding window searches.
const EARLY_EXIT_SCORE: f64 = 0.9;
/// The wider start retry accepts matches down to this fraction of the
/// caller's minimum.
const SALVAGE_FACTOR: f64 = 0.7;
/// Adjacent matched words further apart than this count against continuity.
const MAX_NORMAL_GAP_S: f64 = 1.0;
/// Preferred-time anchor slack and window margins, in words.
const PREFERRED_TIME_SLACK_S: f64 = 2.0;
const PREFERRED_MARGIN_BEFORE: usize = 5;
const PREFERRED_MARGIN_AFTER: usize = 10;

#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub search_start_index: usize,
    /// Inclusive; defaults to the last aligned word.
    pub search_end_index: Option<usize>,
    pub min_confidence: f64,
    /// Narrows the start search to a window around this time. An
    /// optimization and a tie-break toward the locally expected occurrence
    /// of repeated phrases, not a correctness requirement.
    pub preferred_start_time: Option<f64>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            search_start_index: 0,
            search_end_index: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            preferred_start_time: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct WindowScore {
    index: usize,
    score: f64,
}

/// Locate `section_text` inside `aligned_words` and return its word span
/// with a blended confidence. Errors are expected outcomes (heavy ad-libs,
/// edits that no longer resemble the transcript), never process faults.
pub fn match_section_to_words(
    section_text: &str,
    aligned_words: &[TimestampedWord],
    options: &MatchOptions,
) -> Result<SectionMatch, SyncError> {
    let salvage = options.min_confidence * SALVAGE_FACTOR;
    if aligned_words.is_empty() {
        return Err(SyncError::no_match(salvage));
    }

    let section_words = tokenize(section_text);
    if section_words.is_empty() {
        return Err(SyncError::NoTokens);
    }

    let full_start = options.search_start_index;
    let full_end = options
        .search_end_index
        .unwrap_or(aligned_words.len() - 1)
        .min(aligned_words.len() - 1);

    // Preferred-time narrowing: anchor on the first word starting at or
    // after (preferred - slack), with a margin of words on both sides.
    let mut start_search = full_start;
    let mut end_search = full_end;
    if let Some(preferred) = options.preferred_start_time {
        if let Some(near_idx) = aligned_words
            .iter()
            .position(|w| w.start_s >= preferred - PREFERRED_TIME_SLACK_S)
        {
            start_search = start_search.max(near_idx.saturating_sub(PREFERRED_MARGIN_BEFORE));
            end_search = end_search.min(near_idx + section_words.len() + PREFERRED_MARGIN_AFTER);
        }
    }

    let narrowed =
        find_best_start_position(&section_words, aligned_words, start_search, end_search);

    let start_match = match narrowed {
        Some(m) if m.score >= options.min_confidence => m,
        // Salvage pass: retry once over the full array and accept weaker
        // anchors down to the salvage threshold.
        _ => match find_best_start_position(&section_words, aligned_words, full_start, full_end) {
            Some(m) if m.score >= salvage => m,
            _ => return Err(SyncError::no_match(salvage)),
        },
    };

    let end_bound = (start_match.index + section_words.len() * 2).min(full_end);
    let mut end_match =
        find_best_end_position(&section_words, aligned_words, start_match.index, end_bound);

    if end_match.score <= 0.0 {
        // Nothing scored: estimate the end from the section's word count and
        // halve the confidence to reflect the guess.
        end_match = WindowScore {
            index: (start_match.index + section_words.len() - 1).min(aligned_words.len() - 1),
            score: start_match.score * 0.5,
        };
    }

    let matched_words = &aligned_words[start_match.index..=end_match.index];
    if matched_words.is_empty() {
        return Err(SyncError::no_match(salvage));
    }

    let gap_score = calculate_gap_score(matched_words);
    let confidence = start_match.score * 0.4 + end_match.score * 0.4 + gap_score * 0.2;

    tracing::debug!(
        start_index = start_match.index,
        end_index = end_match.index,
        start_score = format!("{:.3}", start_match.score),
        end_score = format!("{:.3}", end_match.score),
        gap_score = format!("{:.3}", gap_score),
        confidence = format!("{:.3}", confidence),
        "locator: selected section window"
    );

    if confidence < options.min_confidence {
        return Err(SyncError::low_confidence(confidence, options.min_confidence));
    }

    let window = MAX_WINDOW_SIZE.min(section_words.len());
    Ok(SectionMatch {
        start_time_s: matched_words[0].start_s,
        end_time_s: matched_words[matched_words.len() - 1].end_s,
        matched_words: matched_words.to_vec(),
        confidence,
        start_word_index: start_match.index,
        end_word_index: end_match.index,
        match_details: MatchDetails {
            prefix_matches: (start_match.score * window as f64).round() as usize,
            suffix_matches: (end_match.score * window as f64).round() as usize,
            total_words: matched_words.len(),
            gap_score,
        },
    })
}

/// Slide a prefix window across `[search_start, search_end]`, keeping the
/// best-scoring position. Returns `None` when no window scores above zero.
fn find_best_start_position(
    section_words: &[String],
    aligned_words: &[TimestampedWord],
    search_start: usize,
    search_end: usize,
) -> Option<WindowScore> {
    let window = MAX_WINDOW_SIZE.min(section_words.len());
    let mut best: Option<WindowScore> = None;

    // Last start position whose window still fits inside the bounds.
    let last_start = (search_end + 1).checked_sub(window)?;
    for i in search_start..=last_start {
        let score = score_sequence(section_words, aligned_words, i, window);
        if score > best.map_or(0.0, |b| b.score) {
            best = Some(WindowScore { index: i, score });
            if score >= EARLY_EXIT_SCORE {
                break;
            }
        }
    }
    best
}

/// Search outward from the expected end position in alternating +/- offsets,
/// scoring the section's last window against each candidate window end.
fn find_best_end_position(
    section_words: &[String],
    aligned_words: &[TimestampedWord],
    start_index: usize,
    search_end: usize,
) -> WindowScore {
    let window = MAX_WINDOW_SIZE.min(section_words.len());
    let last_words = &section_words[section_words.len() - window..];

    let expected_end = (start_index + section_words.len() - 1).min(search_end);
    // Radius tuned empirically against the confidence thresholds; changing
    // it shifts which of several repeated phrases gets matched.
    let search_radius = (section_words.len() + 1) / 2;

    let mut best = WindowScore {
        index: start_index,
        score: 0.0,
    };

    for offset in 0..=search_radius as i64 {
        for direction in [0i64, 1, -1] {
            if direction == 0 && offset != 0 {
                continue;
            }

            let i = expected_end as i64 + offset * direction;
            if i < start_index as i64 || i > search_end as i64 {
                continue;
            }
            let i = i as usize;
            let Some(window_start) = (i + 1).checked_sub(window) else {
                continue;
            };
            if window_start < start_index {
                continue;
            }

            let score = score_sequence(last_words, aligned_words, window_start, window);
            if score > best.score {
                best = WindowScore { index: i, score };
                if score >= EARLY_EXIT_SCORE {
                    return best;
                }
            }
        }
    }

    best
}

/// Continuity proxy: the fraction of adjacent matched-word pairs whose time
/// gap is within [0, MAX_NORMAL_GAP_S]. Large gaps imply the window
/// straddles unrelated lyrics.
pub(crate) fn calculate_gap_score(words: &[TimestampedWord]) -> f64 {
    if words.len() <= 1 {
        return 1.0;
    }

    let mut normal_gaps = 0usize;
    for pair in words.windows(2) {
        let gap = pair[1].start_s - pair[0].end_s;
        if (0.0..=MAX_NORMAL_GAP_S).contains(&gap) {
            normal_gaps += 1;
        }
    }
    normal_gaps as f64 / (words.len() - 1) as f64
}
