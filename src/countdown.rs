//! Duration-based countdown timers.
//!
//! A `CountdownTimer` accumulates the frame clock's delta until it reaches
//! its duration, then fires its completion callback. Loop mode re-arms the
//! timer each period; unscaled mode ignores the clock's time scale.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::FrameClock;
use crate::timer::{Timer, TimerState};

/// State cell shared between a countdown timer and its handles.
struct CountdownCore {
    duration: Duration,
    elapsed: Cell<Duration>,
    state: Cell<TimerState>,
}

impl CountdownCore {
    fn cancel(&self) {
        if !self.state.get().is_terminal() {
            self.state.set(TimerState::Cancelled);
        }
    }

    fn pause(&self) {
        if self.state.get() == TimerState::Running {
            self.state.set(TimerState::Paused);
        }
    }

    fn resume(&self) {
        if self.state.get() == TimerState::Paused {
            self.state.set(TimerState::Running);
        }
    }
}

/// Countdown over clock time with a completion callback.
///
/// Built from a clock handle, a duration and an `on_complete` callback.
/// Per-frame progress reporting, looping and unscaled-time mode are layered
/// on with the consuming configuration methods. Obtain a
/// [`CountdownHandle`] before registering if the caller needs to control or
/// observe the timer afterwards.
pub struct CountdownTimer {
    core: Rc<CountdownCore>,
    clock: FrameClock,
    looped: bool,
    unscaled: bool,
    on_complete: Box<dyn FnMut()>,
    on_update: Option<Box<dyn FnMut(Duration)>>,
}

impl CountdownTimer {
    /// A running timer that fires `on_complete` once `duration` worth of
    /// frame time has accumulated. `FnMut` because looped timers fire
    /// repeatedly.
    pub fn new(
        clock: &FrameClock,
        duration: Duration,
        on_complete: impl FnMut() + 'static,
    ) -> Self {
        Self {
            core: Rc::new(CountdownCore {
                duration,
                elapsed: Cell::new(Duration::ZERO),
                state: Cell::new(TimerState::Running),
            }),
            clock: clock.clone(),
            looped: false,
            unscaled: false,
            on_complete: Box::new(on_complete),
            on_update: None,
        }
    }

    /// Re-arm every period instead of completing. A looped timer only
    /// leaves the live set when cancelled.
    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Advance by the clock's raw delta, ignoring the time scale.
    pub fn use_unscaled_time(mut self, unscaled: bool) -> Self {
        self.unscaled = unscaled;
        self
    }

    /// Invoke `f` with the total elapsed time after every advancing tick,
    /// before any completion firing for that tick.
    pub fn on_update(mut self, f: impl FnMut(Duration) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Control/observer handle sharing this timer's state.
    pub fn handle(&self) -> CountdownHandle {
        CountdownHandle {
            core: Rc::clone(&self.core),
        }
    }
}

impl Timer for CountdownTimer {
    fn update(&mut self) {
        if self.core.state.get() != TimerState::Running {
            return;
        }

        let dt = if self.unscaled {
            self.clock.unscaled_delta()
        } else {
            self.clock.delta()
        };
        if dt.is_zero() {
            return;
        }

        let mut elapsed = self.core.elapsed.get() + dt;
        self.core.elapsed.set(elapsed);

        if let Some(f) = self.on_update.as_mut() {
            f(elapsed);
        }

        if self.looped {
            if self.core.duration.is_zero() {
                // Degenerate period: fire once per advancing tick.
                (self.on_complete)();
                return;
            }
            // Carry overshoot so a long frame fires once per elapsed
            // period instead of swallowing the extra time.
            while elapsed >= self.core.duration {
                elapsed -= self.core.duration;
                self.core.elapsed.set(elapsed);
                (self.on_complete)();
                if self.core.state.get() != TimerState::Running {
                    // The callback cancelled or paused us via a handle.
                    break;
                }
            }
        } else if elapsed >= self.core.duration {
            self.core.elapsed.set(self.core.duration);
            self.core.state.set(TimerState::Completed);
            (self.on_complete)();
        }
    }

    fn cancel(&mut self) {
        self.core.cancel();
    }

    fn pause(&mut self) {
        self.core.pause();
    }

    fn resume(&mut self) {
        self.core.resume();
    }

    fn is_done(&self) -> bool {
        self.core.state.get().is_terminal()
    }
}

/// Caller-retained handle to a [`CountdownTimer`].
///
/// The handle stays valid after the manager drops the timer; once the
/// timer is completed or cancelled the mutating calls are no-ops and the
/// accessors keep reporting the final state.
#[derive(Clone)]
pub struct CountdownHandle {
    core: Rc<CountdownCore>,
}

impl CountdownHandle {
    pub fn cancel(&self) {
        self.core.cancel();
    }

    pub fn pause(&self) {
        self.core.pause();
    }

    pub fn resume(&self) {
        self.core.resume();
    }

    pub fn state(&self) -> TimerState {
        self.core.state.get()
    }

    pub fn is_done(&self) -> bool {
        self.core.state.get().is_terminal()
    }

    /// Frame time accumulated so far.
    pub fn elapsed(&self) -> Duration {
        self.core.elapsed.get()
    }

    /// Time left until the next firing; zero once done.
    pub fn remaining(&self) -> Duration {
        self.core.duration.saturating_sub(self.core.elapsed.get())
    }

    /// Ratio complete in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        let duration = self.core.duration.as_secs_f32();
        if duration > 0.0 {
            (self.core.elapsed.get().as_secs_f32() / duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}
