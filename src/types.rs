use serde::{Deserialize, Serialize};

fn default_alignment_success() -> bool {
    true
}
fn default_alignment_prob() -> f64 {
    1.0
}

/// One token with a time range assigned by an external forced-alignment
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedWord {
    /// Upstream payloads use `word` for this field; newer renders use `text`.
    #[serde(alias = "word")]
    pub text: String,
    /// Seconds interval is [start_s, end_s]. `start_s <= end_s` holds after
    /// ingestion, but raw arrays may contain overlaps and gaps.
    pub start_s: f64,
    pub end_s: f64,
    #[serde(default = "default_alignment_success")]
    pub alignment_success: bool,
    #[serde(default = "default_alignment_prob")]
    pub alignment_prob: f64,
}

impl TimestampedWord {
    pub fn duration_s(&self) -> f64 {
        (self.end_s - self.start_s).max(0.0)
    }
}

/// Derived grouping of consecutive words. Boundaries are recomputed whenever
/// the word array changes; they are never authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<TimestampedWord>,
    pub start_s: f64,
    pub end_s: f64,
    pub text: String,
    pub index: usize,
}

/// Per-tick resolver output. Recreated every tick; carries no identity
/// beyond the indices (-1 means no active index).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncState {
    pub raw_time_s: f64,
    pub smoothed_time_s: f64,
    pub active_word_index: i32,
    pub active_line_index: i32,
    pub confidence: f64,
}

/// Result of one section-matching call. Confidence is advisory: duplicate
/// lyric phrases can still resolve to the wrong occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMatch {
    pub start_time_s: f64,
    pub end_time_s: f64,
    pub matched_words: Vec<TimestampedWord>,
    /// Blend of start-window, end-window, and temporal-continuity scores,
    /// in [0, 1].
    pub confidence: f64,
    pub start_word_index: usize,
    pub end_word_index: usize,
    pub match_details: MatchDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub prefix_matches: usize,
    pub suffix_matches: usize,
    pub total_words: usize,
    pub gap_score: f64,
}
