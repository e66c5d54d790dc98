//! Frame clock
//!
//! Turns raw wall-clock samples into scene time plus a clamped frame delta.

use crate::consts::{MAX_FRAME_DT, REFERENCE_DT, REFERENCE_FPS};

/// One frame's timing, handed to `sim::tick`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the first sampled frame
    pub now_ms: f64,
    /// Seconds since the previous frame, in [0, MAX_FRAME_DT]
    pub dt: f32,
}

impl FrameTime {
    pub fn new(now_ms: f64, dt: f32) -> Self {
        Self { now_ms, dt }
    }

    /// A single reference-rate frame at `now_ms`
    pub fn reference(now_ms: f64) -> Self {
        Self::new(now_ms, REFERENCE_DT)
    }

    /// Multiplier for constants tuned as "per reference frame"
    #[inline]
    pub fn frame_scale(&self) -> f32 {
        self.dt * REFERENCE_FPS
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    origin_ms: Option<f64>,
    last_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a monotonic wall-clock sample (ms)
    pub fn sample(&mut self, wall_ms: f64) -> FrameTime {
        let Some(origin) = self.origin_ms else {
            self.origin_ms = Some(wall_ms);
            self.last_ms = wall_ms;
            return FrameTime::new(0.0, REFERENCE_DT);
        };

        let dt = ((wall_ms - self.last_ms) / 1000.0) as f32;
        // Hosts occasionally hand back a sample older than the previous one
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.last_ms = self.last_ms.max(wall_ms);
        FrameTime::new(self.last_ms - origin, dt)
    }

    /// Scene time of the most recent sample
    pub fn elapsed_ms(&self) -> f64 {
        self.origin_ms.map_or(0.0, |origin| self.last_ms - origin)
    }
}
