/// Read-only view of the audio transport. Injected rather than looked up
/// globally so multiple engines (preview vs. main player) can run against
/// independent transports, and tests can run against fake clocks.
pub trait PlaybackClock {
    /// Current transport position in seconds, or `None` when no audio
    /// source is active.
    fn current_time_s(&self) -> Option<f64>;
    fn is_playing(&self) -> bool;
}

/// Host-side tick scheduling (timer / animation-frame abstraction). The
/// engine requests at most one outstanding tick at a time.
pub trait TickScheduler {
    /// Request a single tick callback after `delay_ms`, replacing any
    /// outstanding request.
    fn request_tick(&mut self, delay_ms: f64);
    /// Cancel the outstanding request, if any.
    fn cancel(&mut self);
}

/// Edge-triggered change notifications. An index of -1 means no active
/// word/line. Each change is delivered exactly once.
pub trait SyncObserver {
    fn on_active_word_change(&mut self, _index: i32) {}
    fn on_active_line_change(&mut self, _index: i32) {}
}
