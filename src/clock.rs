//! Frame time source.
//!
//! The host loop owns one `FrameClock` and advances it once per frame,
//! either by measuring wall time (`tick`) or by stepping an explicit delta
//! (`advance`). Timers hold cheap clones of the clock and read the current
//! frame's elapsed time from it during their own update, so the manager
//! never has to supply time to anything it dispatches.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared per-frame time source.
///
/// Cloning is cheap and every clone observes the same clock. A fresh clock
/// reports a zero delta until the first `tick`/`advance` call.
#[derive(Clone)]
pub struct FrameClock {
    inner: Rc<ClockInner>,
}

struct ClockInner {
    last: Cell<Instant>,
    raw_delta: Cell<Duration>,
    scale: Cell<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ClockInner {
                last: Cell::new(Instant::now()),
                raw_delta: Cell::new(Duration::ZERO),
                scale: Cell::new(1.0),
            }),
        }
    }

    /// Measure the time elapsed since the previous frame and publish it as
    /// the current frame delta.
    pub fn tick(&self) {
        let now = Instant::now();
        let last = self.inner.last.replace(now);
        self.inner.raw_delta.set(now.duration_since(last));
    }

    /// Publish `dt` as the current frame delta without consulting the wall
    /// clock. Fixed-step hosts and tests drive the clock this way.
    pub fn advance(&self, dt: Duration) {
        self.inner.last.set(Instant::now());
        self.inner.raw_delta.set(dt);
    }

    /// Current frame delta with the time scale applied.
    pub fn delta(&self) -> Duration {
        let scale = self.inner.scale.get();
        // Scaling round-trips through float seconds and perturbs the
        // delta; skip it entirely at the default scale.
        if scale == 1.0 {
            return self.inner.raw_delta.get();
        }
        self.inner.raw_delta.get().mul_f64(scale.into())
    }

    /// Current frame delta ignoring the time scale.
    pub fn unscaled_delta(&self) -> Duration {
        self.inner.raw_delta.get()
    }

    pub fn scale(&self) -> f32 {
        self.inner.scale.get()
    }

    /// Set the global time scale. `0.0` freezes every scaled timer;
    /// values below zero are clamped to zero and non-finite values are
    /// ignored.
    pub fn set_scale(&self, scale: f32) {
        if scale.is_finite() {
            self.inner.scale.set(scale.max(0.0));
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
