use crate::matching::normalize::normalize;
use crate::types::{Line, TimestampedWord};

/// Gap to the next word that closes the current line.
const LINE_GAP_THRESHOLD_S: f64 = 0.5;
const MAX_LINE_WORDS: usize = 8;
const SENTENCE_PUNCTUATION: [char; 4] = ['.', '!', '?', '…'];

/// Group ordered words into display lines. Single forward pass, O(n).
///
/// A line closes on: a line-break marker in the token, a gap to the next
/// word above the threshold, the word cap, a token ending in sentence
/// punctuation, or the end of the array. Lines that normalize to nothing
/// (blank or structural-tag-only) are dropped; survivors are re-indexed
/// sequentially from zero.
pub fn group_into_lines(words: &[TimestampedWord]) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<TimestampedWord> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        current.push(word.clone());

        let next = words.get(i + 1);
        let gap_break = next
            .map(|n| n.start_s - word.end_s > LINE_GAP_THRESHOLD_S)
            .unwrap_or(false);
        let should_break = word.text.contains('\n')
            || gap_break
            || current.len() >= MAX_LINE_WORDS
            || ends_sentence(&word.text)
            || next.is_none();

        if should_break {
            flush_line(&mut current, &mut lines);
        }
    }

    lines
}

fn ends_sentence(token: &str) -> bool {
    token
        .trim_end()
        .chars()
        .next_back()
        .map(|c| SENTENCE_PUNCTUATION.contains(&c))
        .unwrap_or(false)
}

fn flush_line(current: &mut Vec<TimestampedWord>, lines: &mut Vec<Line>) {
    if current.is_empty() {
        return;
    }

    let text = current
        .iter()
        .map(|w| w.text.replace('\n', " "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    // Structural-tag-only and blank lines carry no highlightable content.
    if normalize(&text).is_empty() {
        current.clear();
        return;
    }

    let start_s = current[0].start_s;
    let end_s = current[current.len() - 1].end_s;
    lines.push(Line {
        words: std::mem::take(current),
        start_s,
        end_s,
        text,
        index: lines.len(),
    });
}
