use crate::error::SyncError;

/// Tuning constants for the resolver and smoother. The defaults are the
/// values the engine was calibrated with; change them only in lockstep with
/// the confidence thresholds they were tuned against.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Exponential smoothing factor applied to raw clock reads.
    pub smoothing_factor: f64,
    /// Words highlight this far ahead of the clock to offset perceptual and
    /// rendering latency.
    pub word_look_ahead_ms: f64,
    pub line_look_ahead_ms: f64,
    /// Grace period after a word's nominal end during which it stays active.
    pub word_end_tolerance_ms: f64,
    pub line_end_tolerance_ms: f64,
    /// Inter-word gaps shorter than this keep the previous word highlighted.
    pub word_gap_fill_s: f64,
    /// Minimum interval between ticks while playing (frame cadence).
    pub playing_tick_interval_ms: f64,
    /// Minimum interval between ticks while paused.
    pub paused_tick_interval_ms: f64,
}

impl SyncConfig {
    pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.15;
    pub const DEFAULT_WORD_LOOK_AHEAD_MS: f64 = 80.0;
    pub const DEFAULT_LINE_LOOK_AHEAD_MS: f64 = 120.0;
    pub const DEFAULT_WORD_END_TOLERANCE_MS: f64 = 100.0;
    pub const DEFAULT_LINE_END_TOLERANCE_MS: f64 = 180.0;
    pub const DEFAULT_WORD_GAP_FILL_S: f64 = 0.3;
    pub const DEFAULT_PLAYING_TICK_INTERVAL_MS: f64 = 16.0;
    pub const DEFAULT_PAUSED_TICK_INTERVAL_MS: f64 = 100.0;

    pub(crate) fn validate(&self) -> Result<(), SyncError> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(SyncError::invalid_input(format!(
                "smoothing_factor must be in (0, 1], got {}",
                self.smoothing_factor
            )));
        }
        if self.playing_tick_interval_ms <= 0.0 || self.paused_tick_interval_ms <= 0.0 {
            return Err(SyncError::invalid_input(
                "tick intervals must be positive".to_string(),
            ));
        }
        if self.word_look_ahead_ms < 0.0
            || self.line_look_ahead_ms < 0.0
            || self.word_end_tolerance_ms < 0.0
            || self.line_end_tolerance_ms < 0.0
            || self.word_gap_fill_s < 0.0
        {
            return Err(SyncError::invalid_input(
                "look-aheads, tolerances and gap fill must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: Self::DEFAULT_SMOOTHING_FACTOR,
            word_look_ahead_ms: Self::DEFAULT_WORD_LOOK_AHEAD_MS,
            line_look_ahead_ms: Self::DEFAULT_LINE_LOOK_AHEAD_MS,
            word_end_tolerance_ms: Self::DEFAULT_WORD_END_TOLERANCE_MS,
            line_end_tolerance_ms: Self::DEFAULT_LINE_END_TOLERANCE_MS,
            word_gap_fill_s: Self::DEFAULT_WORD_GAP_FILL_S,
            playing_tick_interval_ms: Self::DEFAULT_PLAYING_TICK_INTERVAL_MS,
            paused_tick_interval_ms: Self::DEFAULT_PAUSED_TICK_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_config_default() {
        let config = SyncConfig::default();
        assert_eq!(config.smoothing_factor, 0.15);
        assert_eq!(config.word_look_ahead_ms, 80.0);
        assert_eq!(config.line_look_ahead_ms, 120.0);
        assert_eq!(config.word_end_tolerance_ms, 100.0);
        assert_eq!(config.line_end_tolerance_ms, 180.0);
        assert_eq!(config.word_gap_fill_s, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_smoothing_factor() {
        let config = SyncConfig {
            smoothing_factor: 0.0,
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_tolerance() {
        let config = SyncConfig {
            word_end_tolerance_ms: -1.0,
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
