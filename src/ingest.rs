use serde::Deserialize;

use crate::error::SyncError;
use crate::types::TimestampedWord;

/// Timestamped-lyrics payloads arrive from the backend in three shapes:
/// an `alignedWords` envelope, a bare word array, or an envelope that also
/// carries the plain lyrics text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlignedWordsEnvelope {
    #[serde(default)]
    normal_lyrics: Option<String>,
    aligned_words: Vec<TimestampedWord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignedLyrics {
    pub words: Vec<TimestampedWord>,
    /// Plain lyrics text when the payload carried one.
    pub plain_text: Option<String>,
}

/// Parse a timestamped-lyrics payload. Entries violating `start <= end` are
/// clamped to zero duration (alignment noise, not a caller fault); entries
/// with non-finite times reject the whole payload.
pub fn parse_aligned_lyrics(payload: &str) -> Result<AlignedLyrics, SyncError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(SyncError::invalid_input("empty lyrics payload"));
    }

    let (words, plain_text) = if trimmed.starts_with('[') {
        let words: Vec<TimestampedWord> = serde_json::from_str(trimmed)
            .map_err(|e| SyncError::json("parse aligned word array", e))?;
        (words, None)
    } else {
        let envelope: AlignedWordsEnvelope = serde_json::from_str(trimmed)
            .map_err(|e| SyncError::json("parse aligned lyrics envelope", e))?;
        (envelope.aligned_words, envelope.normal_lyrics)
    };

    let words = sanitize_words(words)?;
    Ok(AlignedLyrics { words, plain_text })
}

/// Convenience for callers that only need the word array.
pub fn parse_aligned_words(payload: &str) -> Result<Vec<TimestampedWord>, SyncError> {
    parse_aligned_lyrics(payload).map(|lyrics| lyrics.words)
}

fn sanitize_words(words: Vec<TimestampedWord>) -> Result<Vec<TimestampedWord>, SyncError> {
    let mut sanitized = Vec::with_capacity(words.len());
    for mut word in words {
        if !word.start_s.is_finite() || !word.end_s.is_finite() {
            return Err(SyncError::invalid_input(format!(
                "non-finite time range for word {:?}",
                word.text
            )));
        }
        if word.end_s < word.start_s {
            tracing::warn!(
                word = word.text.as_str(),
                start_s = word.start_s,
                end_s = word.end_s,
                "ingest: inverted word range clamped to zero duration"
            );
            word.end_s = word.start_s;
        }
        sanitized.push(word);
    }
    Ok(sanitized)
}
