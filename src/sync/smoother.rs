/// Exponential low-pass filter over raw playback clock reads. Owned by one
/// resolver instance; reset whenever playback stops so a stale accumulator
/// cannot bias the first reads after resume.
#[derive(Debug, Clone)]
pub struct TimeSmoother {
    factor: f64,
    smoothed: Option<f64>,
}

impl TimeSmoother {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            smoothed: None,
        }
    }

    /// Fold one raw sample in. The first sample after a reset passes
    /// through unchanged.
    pub fn update(&mut self, raw_time_s: f64) -> f64 {
        let next = match self.smoothed {
            None => raw_time_s,
            Some(prev) => prev + self.factor * (raw_time_s - prev),
        };
        self.smoothed = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.smoothed = None;
    }

    pub fn value(&self) -> Option<f64> {
        self.smoothed
    }
}
