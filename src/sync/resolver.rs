use crate::config::SyncConfig;
use crate::sync::lines::group_into_lines;
use crate::sync::lookup::{find_active_line, find_active_word_binary};
use crate::sync::smoother::TimeSmoother;
use crate::types::{Line, SyncState, TimestampedWord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    /// Not enabled; `advance` is a no-op.
    Idle,
    /// Enabled but not playing; ticks once per state change, not on a timer.
    Paused,
    /// Ticks at frame cadence, throttled to the configured interval.
    Playing,
}

/// Maps a (smoothed, look-ahead-shifted) playback time to active word/line
/// indices. Pure state machine: the tick schedule and the clock live with
/// the driver, so the resolver tests run against plain numbers.
pub struct ActiveIndexResolver {
    config: SyncConfig,
    words: Vec<TimestampedWord>,
    lines: Vec<Line>,
    smoother: TimeSmoother,
    state: ResolverState,
    last_tick_ms: Option<f64>,
}

impl ActiveIndexResolver {
    pub fn new(config: SyncConfig, words: Vec<TimestampedWord>) -> Self {
        let lines = group_into_lines(&words);
        let smoother = TimeSmoother::new(config.smoothing_factor);
        Self {
            config,
            words,
            lines,
            smoother,
            state: ResolverState::Idle,
            last_tick_ms: None,
        }
    }

    /// Replace the word array wholesale (a new audio render produces a new
    /// full array) and rederive the lines. Smoothing state is kept: it
    /// tracks the clock, not the words.
    pub fn set_words(&mut self, words: Vec<TimestampedWord>) {
        self.lines = group_into_lines(&words);
        self.words = words;
    }

    pub fn words(&self) -> &[TimestampedWord] {
        &self.words
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Externally driven transition. Leaving `Playing` resets the smoother
    /// so a resume does not inherit a stale accumulator.
    pub fn set_state(&mut self, state: ResolverState) {
        if self.state == ResolverState::Playing && state != ResolverState::Playing {
            self.smoother.reset();
        }
        self.state = state;
    }

    /// One resolver tick. Returns `None` when idle or throttled; otherwise
    /// the freshly computed per-tick state. Never fails: callers decide what
    /// a missing clock read means before calling.
    pub fn advance(&mut self, now_ms: f64, raw_time_s: f64) -> Option<SyncState> {
        if self.state == ResolverState::Idle {
            return None;
        }

        let interval_ms = match self.state {
            ResolverState::Playing => self.config.playing_tick_interval_ms,
            _ => self.config.paused_tick_interval_ms,
        };
        if let Some(last) = self.last_tick_ms {
            if now_ms - last < interval_ms {
                return None;
            }
        }
        self.last_tick_ms = Some(now_ms);

        let smoothed_time_s = self.smoother.update(raw_time_s);

        let word_adjusted = smoothed_time_s + self.config.word_look_ahead_ms / 1000.0;
        let line_adjusted = smoothed_time_s + self.config.line_look_ahead_ms / 1000.0;

        let active_word_index = find_active_word_binary(
            &self.words,
            word_adjusted,
            self.config.word_end_tolerance_ms / 1000.0,
            self.config.word_gap_fill_s,
        );
        let active_line_index = find_active_line(
            &self.lines,
            line_adjusted,
            self.config.line_end_tolerance_ms / 1000.0,
        );

        let confidence = self.word_confidence(active_word_index, word_adjusted);

        Some(SyncState {
            raw_time_s,
            smoothed_time_s,
            active_word_index,
            active_line_index,
            confidence,
        })
    }

    /// Progress-based score for the active word: 1.0 inside the word,
    /// decaying past the nominal end (tolerance and gap-fill keep a word
    /// active slightly beyond it). Zero-duration words score 0.5.
    fn word_confidence(&self, word_index: i32, adjusted_time_s: f64) -> f64 {
        let Ok(index) = usize::try_from(word_index) else {
            return 0.0;
        };
        let word = &self.words[index];
        let duration = word.end_s - word.start_s;
        if duration <= 0.0 {
            return 0.5;
        }
        let progress = (adjusted_time_s - word.start_s) / duration;
        if progress <= 1.0 {
            1.0
        } else {
            (1.0 - (progress - 1.0) * 2.0).max(0.0)
        }
    }
}
