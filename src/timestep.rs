//! Fixed-rate update clock for the main loop.

/// Turns variable frame times into a whole number of fixed engine updates.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

/// 60 updates per second.
pub const UPDATE_STEP: f32 = 1.0 / 60.0;

/// Frames slower than this many steps drop the excess instead of spiraling.
const MAX_CATCH_UP_STEPS: u32 = 5;

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(UPDATE_STEP)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        FixedTimestep {
            step,
            accumulator: 0.0,
            max_steps: MAX_CATCH_UP_STEPS,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds one frame's elapsed seconds and returns how many updates to run.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frames_accumulate() {
        let mut clock = FixedTimestep::new(0.5);
        assert_eq!(clock.advance(0.25), 0);
        assert_eq!(clock.advance(0.25), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn long_frame_runs_several_steps() {
        let mut clock = FixedTimestep::new(0.25);
        assert_eq!(clock.advance(0.75), 3);
    }

    #[test]
    fn stall_is_capped() {
        let mut clock = FixedTimestep::new(0.25);
        assert_eq!(clock.advance(100.0), MAX_CATCH_UP_STEPS);
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn negative_time_is_ignored() {
        let mut clock = FixedTimestep::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.step(), UPDATE_STEP);
    }
}
