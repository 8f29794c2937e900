use std::time::Duration;

/// Frame timing snapshot handed to scenes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds to advance the simulation by this frame.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Fixed-budget frame pacer.
///
/// Policy per frame, given the measured wall time of the frame:
/// - finished early: sleep the rest of the budget, next delta is the budget
/// - finished late: no sleep, next delta is the measured time
///
/// There is no catch-up: a late frame only lengthens the next delta.
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    next_dt: Duration,
    frame_index: u64,
}

impl FramePacer {
    /// Creates a pacer targeting `target_fps` frames per second.
    ///
    /// The budget is computed in whole nanoseconds (60 fps → 16_666_666 ns).
    /// A zero rate is treated as 1 fps. The first frame uses the full budget as
    /// its delta.
    pub fn new(target_fps: u32) -> Self {
        let fps = u64::from(target_fps.max(1));
        let budget = Duration::from_nanos(1_000_000_000 / fps);
        Self {
            budget,
            next_dt: budget,
            frame_index: 0,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Timing for the frame about to run.
    pub fn frame_time(&self) -> FrameTime {
        FrameTime {
            dt: self.next_dt.as_secs_f32(),
            frame_index: self.frame_index,
        }
    }

    /// Number of frames finished so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Closes the current frame. Returns how long the caller should sleep.
    pub fn finish_frame(&mut self, elapsed: Duration) -> Option<Duration> {
        self.frame_index = self.frame_index.wrapping_add(1);

        if elapsed < self.budget {
            self.next_dt = self.budget;
            Some(self.budget - elapsed)
        } else {
            self.next_dt = elapsed;
            None
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_budget() {
        let p = FramePacer::new(60);
        assert_eq!(p.budget(), Duration::from_nanos(16_666_666));
        assert!((p.frame_time().dt - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn early_frame_sleeps_remainder_and_uses_budget() {
        let mut p = FramePacer::new(60);
        let sleep = p.finish_frame(Duration::from_millis(4));
        assert_eq!(sleep, Some(Duration::from_nanos(16_666_666 - 4_000_000)));
        assert_eq!(p.frame_time().dt, p.budget().as_secs_f32());
    }

    #[test]
    fn late_frame_carries_overrun_into_next_delta() {
        let mut p = FramePacer::new(60);
        let sleep = p.finish_frame(Duration::from_millis(40));
        assert_eq!(sleep, None);
        assert!((p.frame_time().dt - 0.040).abs() < 1e-6);

        // One slow frame does not poison the next one.
        p.finish_frame(Duration::from_millis(1));
        assert_eq!(p.frame_time().dt, p.budget().as_secs_f32());
    }

    #[test]
    fn exact_budget_is_not_early() {
        let mut p = FramePacer::new(50);
        assert_eq!(p.finish_frame(Duration::from_millis(20)), None);
        assert!((p.frame_time().dt - 0.020).abs() < 1e-6);
    }

    #[test]
    fn zero_fps_is_clamped() {
        assert_eq!(FramePacer::new(0).budget(), Duration::from_secs(1));
    }

    #[test]
    fn frame_index_advances() {
        let mut p = FramePacer::default();
        p.finish_frame(Duration::ZERO);
        p.finish_frame(Duration::ZERO);
        assert_eq!(p.frames(), 2);
        assert_eq!(p.frame_time().frame_index, 2);
    }
}
