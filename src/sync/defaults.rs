use crate::sync::traits::{SyncObserver, TickScheduler};

/// Scheduler for hosts that drive `SyncEngine::tick` themselves. Tick
/// requests are dropped; the in-flight guard still applies.
#[derive(Debug, Default)]
pub struct NullScheduler;

impl TickScheduler for NullScheduler {
    fn request_tick(&mut self, _delay_ms: f64) {}

    fn cancel(&mut self) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SyncObserver for NullObserver {}
