use std::time::{Duration, Instant};

/// Frames-per-second sampler over a fixed window.
///
/// `record` is called once per presented frame and yields a new estimate only
/// when the sampling window has elapsed, so observers are rate limited.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Instant,
    frames: u32,
    last: Option<f32>,
}

impl FpsCounter {
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

    pub fn starting_at(start: Instant) -> Self {
        Self::with_window(start, Self::DEFAULT_WINDOW)
    }

    pub fn with_window(start: Instant, window: Duration) -> Self {
        debug_assert!(!window.is_zero());
        Self {
            window,
            window_start: start,
            frames: 0,
            last: None,
        }
    }

    /// Counts a frame presented at `now`.
    ///
    /// Returns `Some(fps)` when this frame closes a sampling window.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;

        let span = now.saturating_duration_since(self.window_start);
        if span < self.window {
            return None;
        }

        let fps = self.frames as f32 / span.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        self.last = Some(fps);
        Some(fps)
    }

    /// Most recent completed estimate.
    #[inline]
    pub fn last(&self) -> Option<f32> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::starting_at(t0);

        let mut reports = Vec::new();
        // 60 frames spread over 1.5 seconds.
        for i in 1..=90u64 {
            if let Some(v) = fps.record(t0 + Duration::from_micros(i * 16_667)) {
                reports.push(v);
            }
        }

        assert_eq!(reports.len(), 1);
        assert!((reports[0] - 60.0).abs() < 0.5, "got {}", reports[0]);
        assert_eq!(fps.last(), Some(reports[0]));
    }

    #[test]
    fn no_estimate_before_first_window() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::starting_at(t0);
        assert_eq!(fps.record(t0 + Duration::from_millis(500)), None);
        assert_eq!(fps.last(), None);
    }
}
