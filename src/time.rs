//! Frame timing for the windowed host.
//!
//! The particle field itself is frame-count based and never reads a clock.
//! [`FrameTimer`] only feeds the host: elapsed time for the timer queue and a
//! periodically refreshed frames-per-second figure for logging.

use std::time::{Duration, Instant};

/// How often the FPS figure is recomputed.
pub const FPS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct FrameTimer {
    start: Instant,
    frame_count: u64,
    fps_frame_count: u64,
    fps_update_time: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            frame_count: 0,
            fps_frame_count: 0,
            fps_update_time: start,
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }

    /// Count one presented frame at `now`.
    ///
    /// Returns the new FPS figure when the measurement interval has passed,
    /// `None` otherwise.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frame_count += 1;

        let since = now.saturating_duration_since(self.fps_update_time);
        if since < FPS_INTERVAL || since.is_zero() {
            return None;
        }
        let frames = self.frame_count - self.fps_frame_count;
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        Some(frames as f32 / since.as_secs_f32())
    }

    /// Frames counted so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_reported_once_per_interval() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);

        for i in 1..60 {
            assert_eq!(timer.tick(start + Duration::from_millis(i * 16)), None);
        }
        let fps = timer.tick(start + Duration::from_secs(1)).unwrap();
        assert!((fps - 60.0).abs() < 0.01);
        assert_eq!(timer.frame(), 60);

        assert_eq!(timer.tick(start + Duration::from_millis(1100)), None);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let start = Instant::now();
        let timer = FrameTimer::starting_at(start + Duration::from_secs(10));
        assert_eq!(timer.elapsed_at(start), Duration::ZERO);
    }
}
