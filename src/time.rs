//! Frame timing.
//!
//! A [`FrameTick`] is everything the engine needs from the render loop:
//! elapsed session time and the delta since the previous frame. A
//! [`FrameClock`] produces ticks, either from wall time or from a fixed
//! step for headless and deterministic runs.
//!
//! # Example
//!
//! ```ignore
//! use treemorph::time::FrameClock;
//!
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//! let tick = clock.tick();
//! scene.frame(tick);
//! ```

use std::time::Instant;

/// Time input for one frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Time since the session started.
    pub elapsed: f32,
    /// Time since the previous frame.
    pub delta: f32,
}

impl FrameTick {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}

/// Source of frame ticks.
#[derive(Debug)]
pub struct FrameClock {
    /// Wall-clock reading at the previous tick.
    last_frame: Instant,
    /// Accumulated session time in seconds.
    elapsed_secs: f32,
    /// Delta of the most recent tick.
    delta_secs: f32,
    /// Total ticks produced.
    frame_count: u64,
    /// Fixed step; `None` uses wall time.
    fixed_delta: Option<f32>,
    /// Multiplier on every delta (1.0 = normal speed).
    time_scale: f32,
    paused: bool,
}

impl FrameClock {
    /// A clock driven by wall time.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// A clock that advances by exactly `delta` per tick.
    pub fn fixed(delta: f32) -> Self {
        Self {
            fixed_delta: Some(delta),
            ..Self::new()
        }
    }

    /// Produce the tick for a new frame.
    ///
    /// While paused the delta is zero and elapsed time stands still.
    pub fn tick(&mut self) -> FrameTick {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
        } else {
            self.delta_secs = self.fixed_delta.unwrap_or(raw_delta) * self.time_scale;
            self.elapsed_secs += self.delta_secs;
        }
        self.frame_count += 1;

        FrameTick::new(self.elapsed_secs, self.delta_secs)
    }

    /// Produce a tick with an explicit delta, e.g. to replay a long stall.
    pub fn advance(&mut self, delta: f32) -> FrameTick {
        self.last_frame = Instant::now();
        self.delta_secs = delta * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;
        FrameTick::new(self.elapsed_secs, self.delta_secs)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
