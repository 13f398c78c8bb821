//! Fixed-step simulation clock for the headless driver.
//!
//! Real frame time is accumulated and drained in fixed steps, so plugin
//! updates see a steady tick rate no matter how irregular the frames are.
//! Simulation time runs `time_warp` times faster than real time.

use tracing::warn;

/// Fixed tick length in real seconds: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame that is fully simulated; longer frames are clamped.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct SimulationClock {
    time_warp: f64,
    accumulator: f64,
    sim_time: f64,
    tick_count: u64,
}

impl SimulationClock {
    pub fn new(time_warp: f64) -> Self {
        Self {
            time_warp,
            accumulator: 0.0,
            sim_time: 0.0,
            tick_count: 0,
        }
    }

    /// Account for `frame_time` real seconds and run the ticks that became due.
    ///
    /// `tick_fn(sim_dt, sim_time)` is called once per tick with the simulation
    /// time at the start of that tick. Returns the number of ticks run.
    pub fn advance(&mut self, frame_time: f64, mut tick_fn: impl FnMut(f64, f64)) -> u32 {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };
        self.accumulator += frame_time;

        let sim_dt = FIXED_DT * self.time_warp;
        let mut ticks = 0;
        while self.accumulator >= FIXED_DT {
            tick_fn(sim_dt, self.sim_time);
            self.sim_time += sim_dt;
            self.accumulator -= FIXED_DT;
            self.tick_count += 1;
            ticks += 1;
        }
        ticks
    }

    /// Simulation seconds elapsed.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tick() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(FIXED_DT, |_, _| {}), 1);
        assert!(clock.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_partial_frame_runs_nothing() {
        let mut clock = SimulationClock::default();
        let mut ticks = 0;
        clock.advance(0.5 * FIXED_DT, |_, _| ticks += 1);
        assert_eq!(ticks, 0);
        assert!((clock.accumulator - 0.5 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_time_warp_scales_sim_time() {
        let mut clock = SimulationClock::new(60.0);
        let mut times = Vec::new();
        clock.advance(3.0 * FIXED_DT, |dt, t| {
            assert!((dt - 1.0).abs() < 1e-12, "one simulated second per tick");
            times.push(t);
        });
        assert_eq!(times.len(), 3);
        assert!((times[2] - 2.0).abs() < 1e-9);
        assert!((clock.sim_time() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = SimulationClock::default();
        let ticks = clock.advance(1.0, |_, _| {});
        let max_ticks = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(ticks > 0);
        assert!(
            ticks <= max_ticks,
            "expected at most {max_ticks} ticks, got {ticks}"
        );
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(-1.0, |_, _| {}), 0);
        assert_eq!(clock.tick_count(), 0);
    }

    #[test]
    fn test_tick_count_accumulates() {
        let mut clock = SimulationClock::default();
        for _ in 0..10 {
            clock.advance(FIXED_DT * 2.0, |_, _| {});
        }
        let expected = clock.tick_count() as f64 * FIXED_DT;
        assert!((clock.sim_time() - expected).abs() < 1e-10);
    }
}
