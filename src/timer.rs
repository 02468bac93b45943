//! The timer capability contract.

/// Lifecycle state shared by the built-in timer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
    /// Ran to the end of its duration and fired.
    Completed,
    /// Terminated early; completion callbacks never fire.
    Cancelled,
}

impl TimerState {
    /// Terminal states. The manager sweeps timers in these states at the
    /// end of the tick that observed them.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Capability contract between the manager and the timers it drives.
///
/// Implement this for anything that should be advanced once per frame.
/// The built-in variants are [`CountdownTimer`](crate::CountdownTimer) and
/// [`FrameDelay`](crate::FrameDelay); test doubles implement it directly.
pub trait Timer {
    /// Advance internal state by the current frame's elapsed time.
    ///
    /// Invoked exactly once per tick while the timer is live. Must be a
    /// no-op once [`is_done`](Self::is_done) reports true.
    fn update(&mut self);

    /// Terminate immediately. The timer must report done afterwards and
    /// stop firing its callbacks.
    fn cancel(&mut self);

    /// Stop advancing on `update` until resumed.
    fn pause(&mut self);

    /// Resume advancing after a pause.
    fn resume(&mut self);

    /// Whether the manager should remove this timer at the next sweep.
    fn is_done(&self) -> bool;
}
