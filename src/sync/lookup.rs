use crate::types::{Line, TimestampedWord};

/// Reference word lookup: forward scan for the first word whose
/// `[start_s, end_s + tolerance]` span contains `adjusted_time_s`, then the
/// gap-fill pass (keep the previous word visible across gaps shorter than
/// `gap_fill_s`). Returns -1 when nothing is active.
pub fn find_active_word_linear(
    words: &[TimestampedWord],
    adjusted_time_s: f64,
    end_tolerance_s: f64,
    gap_fill_s: f64,
) -> i32 {
    for (i, word) in words.iter().enumerate() {
        if adjusted_time_s >= word.start_s && adjusted_time_s <= word.end_s + end_tolerance_s {
            return i as i32;
        }
    }

    for i in 0..words.len().saturating_sub(1) {
        let cur = &words[i];
        let next = &words[i + 1];
        if adjusted_time_s > cur.end_s
            && adjusted_time_s < next.start_s
            && next.start_s - cur.end_s < gap_fill_s
        {
            return i as i32;
        }
    }

    -1
}

/// Binary-search word lookup. An optimization over the linear scan for the
/// per-frame hot path; on a miss it falls back to the linear scan, which is
/// the correctness authority (tests assert the two paths agree).
pub fn find_active_word_binary(
    words: &[TimestampedWord],
    adjusted_time_s: f64,
    end_tolerance_s: f64,
    gap_fill_s: f64,
) -> i32 {
    if words.is_empty() {
        return -1;
    }

    let candidate = words.partition_point(|w| w.start_s <= adjusted_time_s);
    if candidate == 0 {
        return -1;
    }
    let candidate = candidate - 1;

    if contains(&words[candidate], adjusted_time_s, end_tolerance_s) {
        // End tolerance can make two tight neighbors both claim the time;
        // walk back to the first claimant.
        let mut index = candidate;
        while index > 0 && contains(&words[index - 1], adjusted_time_s, end_tolerance_s) {
            index -= 1;
        }
        return index as i32;
    }

    find_active_word_linear(words, adjusted_time_s, end_tolerance_s, gap_fill_s)
}

fn contains(word: &TimestampedWord, adjusted_time_s: f64, end_tolerance_s: f64) -> bool {
    adjusted_time_s >= word.start_s && adjusted_time_s <= word.end_s + end_tolerance_s
}

/// Line lookup. Line counts are small, so a linear scan is enough. In a gap
/// between lines the closer line stays active rather than always the
/// previous one; ties favor the previous line.
pub fn find_active_line(lines: &[Line], adjusted_time_s: f64, end_tolerance_s: f64) -> i32 {
    for (i, line) in lines.iter().enumerate() {
        if adjusted_time_s >= line.start_s && adjusted_time_s <= line.end_s + end_tolerance_s {
            return i as i32;
        }
    }

    for i in 0..lines.len().saturating_sub(1) {
        let cur = &lines[i];
        let next = &lines[i + 1];
        if adjusted_time_s > cur.end_s && adjusted_time_s < next.start_s {
            let to_prev = adjusted_time_s - cur.end_s;
            let to_next = next.start_s - adjusted_time_s;
            return if to_next < to_prev { (i + 1) as i32 } else { i as i32 };
        }
    }

    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::lines::group_into_lines;

    fn word(text: &str, start_s: f64, end_s: f64) -> TimestampedWord {
        TimestampedWord {
            text: text.to_string(),
            start_s,
            end_s,
            alignment_success: true,
            alignment_prob: 1.0,
        }
    }

    fn gapped_words() -> Vec<TimestampedWord> {
        vec![
            word("a", 0.0, 1.0),
            word("b", 1.2, 2.0),
            word("c", 2.0, 3.0),
        ]
    }

    const TOL: f64 = 0.1;
    const GAP: f64 = 0.3;

    #[test]
    fn gap_fill_keeps_previous_word() {
        let words = gapped_words();
        // 1.15 sits past a's end tolerance but inside the 0.2 s gap.
        assert_eq!(find_active_word_linear(&words, 1.15, TOL, GAP), 0);
        assert_eq!(find_active_word_binary(&words, 1.15, TOL, GAP), 0);
    }

    #[test]
    fn next_word_takes_over_at_its_start() {
        let words = gapped_words();
        assert_eq!(find_active_word_linear(&words, 1.25, TOL, GAP), 1);
        assert_eq!(find_active_word_binary(&words, 1.25, TOL, GAP), 1);
    }

    #[test]
    fn tolerance_extends_word_past_end() {
        let words = gapped_words();
        assert_eq!(find_active_word_linear(&words, 1.05, TOL, GAP), 0);
        assert_eq!(find_active_word_binary(&words, 1.05, TOL, GAP), 0);
    }

    #[test]
    fn before_first_word_is_inactive() {
        let words = gapped_words();
        assert_eq!(find_active_word_linear(&words, -0.5, TOL, GAP), -1);
        assert_eq!(find_active_word_binary(&words, -0.5, TOL, GAP), -1);
    }

    #[test]
    fn past_last_word_is_inactive() {
        let words = gapped_words();
        assert_eq!(find_active_word_linear(&words, 5.0, TOL, GAP), -1);
        assert_eq!(find_active_word_binary(&words, 5.0, TOL, GAP), -1);
    }

    #[test]
    fn wide_gap_is_not_filled() {
        let words = vec![word("a", 0.0, 1.0), word("b", 2.0, 3.0)];
        assert_eq!(find_active_word_linear(&words, 1.5, TOL, GAP), -1);
        assert_eq!(find_active_word_binary(&words, 1.5, TOL, GAP), -1);
    }

    #[test]
    fn tight_neighbors_first_claimant_wins() {
        // a's end tolerance overlaps b's start; the earlier word must win
        // on both paths.
        let words = vec![word("a", 0.0, 1.0), word("b", 1.05, 2.0)];
        assert_eq!(find_active_word_linear(&words, 1.07, TOL, GAP), 0);
        assert_eq!(find_active_word_binary(&words, 1.07, TOL, GAP), 0);
    }

    #[test]
    fn empty_words_are_inactive() {
        assert_eq!(find_active_word_linear(&[], 1.0, TOL, GAP), -1);
        assert_eq!(find_active_word_binary(&[], 1.0, TOL, GAP), -1);
    }

    fn two_lines() -> Vec<Line> {
        let words = vec![
            word("one", 0.0, 0.4),
            word("two.", 0.5, 0.9),
            word("three", 3.0, 3.4),
            word("four", 3.5, 3.9),
        ];
        group_into_lines(&words)
    }

    #[test]
    fn line_containment_with_tolerance() {
        let lines = two_lines();
        assert_eq!(find_active_line(&lines, 0.2, 0.18), 0);
        assert_eq!(find_active_line(&lines, 1.0, 0.18), 0);
        assert_eq!(find_active_line(&lines, 3.2, 0.18), 1);
    }

    #[test]
    fn line_gap_keeps_closer_line() {
        let lines = two_lines();
        // Gap spans (0.9, 3.0); tolerance extends line 0 to 1.08.
        assert_eq!(find_active_line(&lines, 1.5, 0.18), 0);
        assert_eq!(find_active_line(&lines, 2.8, 0.18), 1);
    }

    #[test]
    fn outside_all_lines_is_inactive() {
        let lines = two_lines();
        assert_eq!(find_active_line(&lines, -1.0, 0.18), -1);
        assert_eq!(find_active_line(&lines, 10.0, 0.18), -1);
    }
}
