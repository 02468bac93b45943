//! Frame-count delays.
//!
//! A `FrameDelay` fires after a fixed number of ticks rather than after a
//! span of clock time, so it advances even while the clock's time scale is
//! zero. Useful for "run this at the start of the next frame" scheduling.

use crate::timer::{Timer, TimerState};

/// One-shot callback deferred by a whole number of ticks.
pub struct FrameDelay {
    remaining: u32,
    state: TimerState,
    callback: Option<Box<dyn FnOnce()>>,
}

impl FrameDelay {
    /// Fire `f` after `ticks` updates. A count of zero is treated as one:
    /// the callback can never run synchronously with registration.
    pub fn new(ticks: u32, f: impl FnOnce() + 'static) -> Self {
        Self {
            remaining: ticks.max(1),
            state: TimerState::Running,
            callback: Some(Box::new(f)),
        }
    }

    /// Fire `f` on the next tick.
    pub fn next_frame(f: impl FnOnce() + 'static) -> Self {
        Self::new(1, f)
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Ticks left before the callback fires.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Timer for FrameDelay {
    fn update(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.state = TimerState::Completed;
            if let Some(f) = self.callback.take() {
                f();
            }
        }
    }

    fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = TimerState::Cancelled;
            // Release whatever the callback captured.
            self.callback = None;
        }
    }

    fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    fn is_done(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_delay(ticks: u32) -> (FrameDelay, Rc<Cell<bool>>) {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let delay = FrameDelay::new(ticks, move || flag.set(true));
        (delay, fired)
    }

    #[test]
    fn fires_after_the_requested_number_of_ticks() {
        let (mut delay, fired) = counting_delay(3);

        delay.update();
        delay.update();
        assert!(!fired.get());
        assert_eq!(delay.remaining(), 1);

        delay.update();
        assert!(fired.get());
        assert!(delay.is_done());
    }

    #[test]
    fn next_frame_fires_on_the_first_tick() {
        let (mut delay, fired) = counting_delay(1);
        delay.update();
        assert!(fired.get());
    }

    #[test]
    fn zero_ticks_is_clamped_to_one() {
        let (mut delay, fired) = counting_delay(0);
        assert_eq!(delay.remaining(), 1);
        delay.update();
        assert!(fired.get());
    }

    #[test]
    fn pause_stops_the_count_and_resume_continues_it() {
        let (mut delay, fired) = counting_delay(2);

        delay.update();
        delay.pause();
        for _ in 0..5 {
            delay.update();
        }
        assert!(!fired.get());
        assert_eq!(delay.remaining(), 1);

        delay.resume();
        delay.update();
        assert!(fired.get());
    }

    #[test]
    fn cancel_drops_the_callback_without_firing_it() {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let mut delay = FrameDelay::new(2, move || flag.set(true));

        delay.cancel();
        assert_eq!(Rc::strong_count(&fired), 1, "captured state not released");

        delay.update();
        assert!(!fired.get());
        assert_eq!(delay.state(), TimerState::Cancelled);
    }

    #[test]
    fn completed_delay_ignores_further_updates() {
        let count = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&count);
        let mut delay = FrameDelay::new(1, move || counter.set(counter.get() + 1));

        delay.update();
        delay.update();
        delay.update();
        assert_eq!(count.get(), 1);
    }
}
