use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::sync::defaults::{NullObserver, NullScheduler};
use crate::sync::runtime::{SyncEngine, SyncEngineParts};
use crate::sync::traits::{PlaybackClock, SyncObserver, TickScheduler};
use crate::types::TimestampedWord;

/// Assembles a `SyncEngine`. A playback clock is mandatory; scheduler and
/// observer default to no-ops for hosts that drive `tick` themselves or
/// poll the engine instead of subscribing.
pub struct SyncEngineBuilder {
    config: SyncConfig,
    words: Vec<TimestampedWord>,
    clock: Option<Box<dyn PlaybackClock>>,
    scheduler: Option<Box<dyn TickScheduler>>,
    observer: Option<Box<dyn SyncObserver>>,
}

impl SyncEngineBuilder {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            words: Vec::new(),
            clock: None,
            scheduler: None,
            observer: None,
        }
    }

    pub fn with_words(mut self, words: Vec<TimestampedWord>) -> Self {
        self.words = words;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn PlaybackClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Box<dyn TickScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn SyncObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<SyncEngine, SyncError> {
        self.config.validate()?;
        let clock = self.clock.ok_or(SyncError::ClockUnavailable)?;

        Ok(SyncEngine::from_parts(SyncEngineParts {
            config: self.config,
            words: self.words,
            clock,
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Box::new(NullScheduler)),
            observer: self.observer.unwrap_or_else(|| Box::new(NullObserver)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StoppedClock;

    impl PlaybackClock for StoppedClock {
        fn current_time_s(&self) -> Option<f64> {
            Some(0.0)
        }

        fn is_playing(&self) -> bool {
            false
        }
    }

    #[test]
    fn build_requires_a_clock() {
        let result = SyncEngineBuilder::new(SyncConfig::default()).build();
        assert!(matches!(result, Err(SyncError::ClockUnavailable)));
    }

    #[test]
    fn build_succeeds_with_clock_only() {
        let engine = SyncEngineBuilder::new(SyncConfig::default())
            .with_clock(Box::new(StoppedClock))
            .build()
            .expect("clock is the only required part");
        assert!(!engine.is_enabled());
        assert_eq!(engine.active_word_index(), -1);
        assert_eq!(engine.active_line_index(), -1);
    }

    #[test]
    fn build_rejects_invalid_config() {
        let config = SyncConfig {
            smoothing_factor: 2.0,
            ..SyncConfig::default()
        };
        let result = SyncEngineBuilder::new(config)
            .with_clock(Box::new(StoppedClock))
            .build();
        assert!(matches!(result, Err(SyncError::InvalidInput { .. })));
    }
}
