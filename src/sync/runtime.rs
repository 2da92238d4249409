use crate::config::SyncConfig;
use crate::sync::resolver::{ActiveIndexResolver, ResolverState};
use crate::sync::traits::{PlaybackClock, SyncObserver, TickScheduler};
use crate::types::{SyncState, TimestampedWord};

/// Drives the resolver tick chain: at most one scheduled tick in flight,
/// edge-triggered change callbacks, deterministic cancellation on disable.
pub struct SyncEngine {
    resolver: ActiveIndexResolver,
    clock: Box<dyn PlaybackClock>,
    scheduler: Box<dyn TickScheduler>,
    observer: Box<dyn SyncObserver>,
    enabled: bool,
    playing: bool,
    tick_pending: bool,
    last_word_index: i32,
    last_line_index: i32,
    last_state: Option<SyncState>,
}

pub(crate) struct SyncEngineParts {
    pub config: SyncConfig,
    pub words: Vec<TimestampedWord>,
    pub clock: Box<dyn PlaybackClock>,
    pub scheduler: Box<dyn TickScheduler>,
    pub observer: Box<dyn SyncObserver>,
}

impl SyncEngine {
    pub(crate) fn from_parts(parts: SyncEngineParts) -> Self {
        Self {
            resolver: ActiveIndexResolver::new(parts.config, parts.words),
            clock: parts.clock,
            scheduler: parts.scheduler,
            observer: parts.observer,
            enabled: false,
            playing: false,
            tick_pending: false,
            last_word_index: -1,
            last_line_index: -1,
            last_state: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn resolver(&self) -> &ActiveIndexResolver {
        &self.resolver
    }

    /// Last state a tick produced; survives clock dropouts untouched.
    pub fn last_state(&self) -> Option<SyncState> {
        self.last_state
    }

    pub fn active_word_index(&self) -> i32 {
        self.last_word_index
    }

    pub fn active_line_index(&self) -> i32 {
        self.last_line_index
    }

    /// Start resolving. Schedules the first tick immediately; the chain
    /// then sustains itself while playing.
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        let playing = self.clock.is_playing();
        self.playing = playing;
        self.resolver.set_state(if playing {
            ResolverState::Playing
        } else {
            ResolverState::Paused
        });
        self.schedule_tick(0.0);
    }

    /// Stop resolving and cancel any scheduled tick. Indices keep their
    /// last values; a later enable picks up from the clock.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.scheduler.cancel();
        self.tick_pending = false;
        self.resolver.set_state(ResolverState::Idle);
    }

    /// Push a play/pause transition. Also detected from the clock on each
    /// tick; pushing avoids waiting out a paused-state tick interval.
    pub fn set_playing(&mut self, playing: bool) {
        self.apply_playing(playing);
    }

    /// Replace the word array for a new audio render. Active indices reset
    /// silently; the next tick re-resolves and notifies from scratch.
    pub fn set_words(&mut self, words: Vec<TimestampedWord>) {
        self.resolver.set_words(words);
        self.last_word_index = -1;
        self.last_line_index = -1;
        self.last_state = None;
    }

    /// One driver tick, called by the host scheduler (or directly by hosts
    /// that own the frame loop). `now_ms` is any monotonic millisecond
    /// clock. A failed transport read is a no-op that preserves state; the
    /// chain keeps running and resumes silently when reads recover.
    pub fn tick(&mut self, now_ms: f64) -> Option<SyncState> {
        self.tick_pending = false;
        if !self.enabled {
            return None;
        }

        let clock_playing = self.clock.is_playing();
        if clock_playing != self.playing {
            self.apply_playing(clock_playing);
        }

        let state = match self.clock.current_time_s() {
            Some(raw_time_s) => self.resolver.advance(now_ms, raw_time_s),
            None => {
                tracing::debug!("sync: clock unavailable, preserving state");
                None
            }
        };

        if let Some(state) = state {
            self.notify_changes(&state);
            self.last_state = Some(state);
        }

        if self.playing {
            let interval_ms = self.resolver.config().playing_tick_interval_ms;
            self.schedule_tick(interval_ms);
        }

        state
    }

    fn notify_changes(&mut self, state: &SyncState) {
        if state.active_word_index != self.last_word_index {
            self.last_word_index = state.active_word_index;
            self.observer.on_active_word_change(state.active_word_index);
        }
        if state.active_line_index != self.last_line_index {
            self.last_line_index = state.active_line_index;
            self.observer.on_active_line_change(state.active_line_index);
        }
    }

    fn apply_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        self.playing = playing;
        if !self.enabled {
            return;
        }
        self.resolver.set_state(if playing {
            ResolverState::Playing
        } else {
            ResolverState::Paused
        });
        // Playing starts the chain; pausing gets exactly one state-change
        // tick and then goes quiet.
        self.schedule_tick(0.0);
    }

    fn schedule_tick(&mut self, delay_ms: f64) {
        if self.tick_pending {
            return;
        }
        self.scheduler.request_tick(delay_ms);
        self.tick_pending = true;
    }
}
