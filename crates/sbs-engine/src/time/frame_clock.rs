use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Wall-clock time since the clock started, in seconds (unclamped).
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is
/// paused by the debugger, dragged, or stalls on a blocked present. Elapsed
/// time is never clamped: oscillating entities are pure functions of it.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock whose baseline is `start`, with default clamps.
    ///
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents particles tunnelling through the whole field after long stalls
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_min: Duration::from_micros(100), // 0.0001s
            dt_max: Duration::from_millis(250), // 0.25s
        }
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_and_elapsed_follow_wall_clock() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let a = clock.tick_at(t0 + Duration::from_millis(16));
        let b = clock.tick_at(t0 + Duration::from_millis(48));

        assert!((a.dt - 0.016).abs() < 1e-6);
        assert!((b.dt - 0.032).abs() < 1e-6);
        assert!((b.elapsed - 0.048).abs() < 1e-6);
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
    }

    #[test]
    fn dt_is_clamped_but_elapsed_is_not() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let stalled = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((stalled.dt - 0.25).abs() < 1e-6);
        assert!((stalled.elapsed - 5.0).abs() < 1e-4);

        let same = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((same.dt - 0.0001).abs() < 1e-7);
    }
}
