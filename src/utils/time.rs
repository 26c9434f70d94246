use std::time::{Duration, Instant};

/// Frame clock for the viewer loop.
#[derive(Debug, Clone)]
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time between the last two ticks
    pub delta: Duration,
    /// Time from creation to the last tick
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Starts a new frame at the current wall-clock time.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    /// Starts a new frame `delta` after the previous one, for fixed-step
    /// and headless runs.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.last_update += delta;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut timer = Timer::new();
        timer.advance(Duration::from_millis(16));
        timer.advance(Duration::from_millis(20));
        assert_eq!(timer.frame_count, 2);
        assert_eq!(timer.elapsed, Duration::from_millis(36));
        assert!((timer.dt_seconds() - 0.02).abs() < 1e-6);
    }
}
