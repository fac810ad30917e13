use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
enum Source {
    Wall { last: Instant },
    Fixed { step: Duration },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the host is paused
/// by the debugger, minimized, or stalls. Exponential smoothing in the UI is
/// stable for any `dt`, but a clamped `dt` keeps animations visible after a
/// stall instead of snapping.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Wall-clock driven clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Wall-clock driven clock with custom delta-time clamps.
    ///
    /// A reversed pair is swapped rather than rejected.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        let (dt_min, dt_max) = if dt_min <= dt_max { (dt_min, dt_max) } else { (dt_max, dt_min) };
        Self {
            source: Source::Wall { last: Instant::now() },
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Deterministic clock: every tick advances by exactly `step`.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: Source::Fixed { step },
            frame_index: 0,
            dt_min: Duration::ZERO,
            dt_max: Duration::MAX,
        }
    }

    /// Resets the wall-clock baseline. No-op for fixed clocks.
    ///
    /// Useful when resuming from suspension.
    pub fn reset(&mut self) {
        if let Source::Wall { last } = &mut self.source {
            *last = Instant::now();
        }
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let dt = match &mut self.source {
            Source::Wall { last } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last);
                *last = now;
                dt.clamp(self.dt_min, self.dt_max)
            }
            Source::Fixed { step } => *step,
        };

        let ft = FrameTime { dt: dt.as_secs_f32(), frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_steps_exactly() {
        let mut clock = FrameClock::fixed(Duration::from_millis(50));
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert!((a.dt - 0.05).abs() < 1e-6);
        assert_eq!(a.dt, b.dt);
    }

    #[test]
    fn wall_clock_respects_minimum() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        let t = clock.tick();
        assert!(t.dt >= 0.005 - 1e-6);
        assert!(t.dt <= 0.010 + 1e-6);
    }

    #[test]
    fn reversed_clamps_are_swapped() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(10), Duration::from_millis(5));
        let t = clock.tick();
        assert!(t.dt >= 0.005 - 1e-6);
    }
}
