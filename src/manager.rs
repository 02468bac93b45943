//! Frame-tick timer scheduling
//!
//! The `TimerManager` owns every registered timer and drives them once per
//! tick. Registration is deferred: new timers sit in a pending buffer and
//! join the live set at the start of the next tick, so timers registered
//! from inside a completion callback are never dispatched in the tick that
//! created them.
//!
//! # Tick lifecycle
//!
//! 1. Pending timers are admitted to the live set, in registration order
//! 2. Every live timer receives one `update`
//! 3. Finished timers are swept out of the live set
//!
//! Callbacks that need to schedule follow-up timers hold a [`Registrar`],
//! which writes into the pending buffer without touching the manager.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::clock::FrameClock;
use crate::settings::{BulkScope, ManagerSettings};
use crate::timer::Timer;

type PendingQueue = Rc<RefCell<Vec<Box<dyn Timer>>>>;

/// Owns registered timers and updates them once per tick.
pub struct TimerManager {
    /// Timers receiving updates, in admission order.
    live: Vec<Box<dyn Timer>>,

    /// Timers registered since the last tick, shared with registrars.
    pending: PendingQueue,

    /// Per-manager frame clock; the host advances it, timers read it.
    clock: FrameClock,

    settings: ManagerSettings,

    /// Completed tick count since construction.
    ticks: u64,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::with_settings(ManagerSettings::default())
    }

    pub fn with_settings(settings: ManagerSettings) -> Self {
        Self {
            live: Vec::new(),
            pending: Rc::new(RefCell::new(Vec::new())),
            clock: FrameClock::new(),
            settings,
            ticks: 0,
        }
    }

    /// The clock this manager's timers should be built against.
    ///
    /// The manager never advances it; the host does, before each tick.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    /// Queue a timer for admission at the start of the next tick.
    pub fn register(&self, timer: impl Timer + 'static) {
        let mut pending = self.pending.borrow_mut();
        pending.push(Box::new(timer));
        debug!(pending = pending.len(), "Timer registered");
    }

    /// Registration endpoint that stays valid inside completion callbacks.
    pub fn registrar(&self) -> Registrar {
        Registrar {
            pending: Rc::clone(&self.pending),
        }
    }

    /// Run one tick: admit pending timers, update the live set, sweep out
    /// finished timers.
    pub fn tick(&mut self) {
        self.ticks += 1;

        let admitted = {
            let mut pending = self.pending.borrow_mut();
            let count = pending.len();
            self.live.append(&mut pending);
            count
        };

        for timer in &mut self.live {
            timer.update();
        }

        let before = self.live.len();
        self.live.retain(|timer| !timer.is_done());
        let removed = before - self.live.len();

        if admitted > 0 || removed > 0 {
            trace!(
                tick = self.ticks,
                admitted = admitted,
                removed = removed,
                live = self.live.len(),
                "Tick processed"
            );
        }
    }

    /// Cancel and discard every tracked timer.
    ///
    /// Under [`BulkScope::LiveOnly`] the pending buffer is discarded
    /// without cancelling, so pending timers never observe a state change;
    /// under [`BulkScope::IncludePending`] they are cancelled first.
    pub fn cancel_all(&mut self) {
        let scope = self.settings.bulk_scope;
        let live = self.live.len();
        for timer in &mut self.live {
            timer.cancel();
        }
        self.live.clear();

        // Move pending timers out before dropping them so a destructor
        // that re-enters a registrar doesn't hit a held borrow.
        let drained = std::mem::take(&mut *self.pending.borrow_mut());
        let pending = drained.len();
        if scope == BulkScope::IncludePending {
            for mut timer in drained {
                timer.cancel();
            }
        }

        if live > 0 || pending > 0 {
            debug!(
                live = live,
                pending = pending,
                scope = ?scope,
                "Cancelled all timers"
            );
        }
    }

    /// Pause every timer in scope. Already-finished timers are unaffected.
    pub fn pause_all(&mut self) {
        for timer in &mut self.live {
            timer.pause();
        }
        if self.settings.bulk_scope == BulkScope::IncludePending {
            // Operate outside the borrow; a pause hook may re-enter a
            // registrar. Timers registered mid-call queue up behind the
            // drained ones, unpaused.
            let mut drained = std::mem::take(&mut *self.pending.borrow_mut());
            for timer in &mut drained {
                timer.pause();
            }
            let mut pending = self.pending.borrow_mut();
            drained.append(&mut pending);
            *pending = drained;
        }
        debug!(live = self.live.len(), scope = ?self.settings.bulk_scope, "Paused all timers");
    }

    /// Resume every paused timer in scope.
    pub fn resume_all(&mut self) {
        for timer in &mut self.live {
            timer.resume();
        }
        if self.settings.bulk_scope == BulkScope::IncludePending {
            let mut drained = std::mem::take(&mut *self.pending.borrow_mut());
            for timer in &mut drained {
                timer.resume();
            }
            let mut pending = self.pending.borrow_mut();
            drained.append(&mut pending);
            *pending = drained;
        }
        debug!(live = self.live.len(), scope = ?self.settings.bulk_scope, "Resumed all timers");
    }

    /// Cancel everything, live and pending, regardless of the bulk scope.
    pub fn shutdown(&mut self) {
        let live = self.live.len();
        let pending = self.pending.borrow().len();
        self.teardown();
        if live > 0 || pending > 0 {
            debug!(live = live, pending = pending, "Timer manager shut down");
        }
    }

    fn teardown(&mut self) {
        for timer in &mut self.live {
            timer.cancel();
        }
        self.live.clear();

        let drained = std::mem::take(&mut *self.pending.borrow_mut());
        for mut timer in drained {
            timer.cancel();
        }
    }

    /// Timers currently receiving updates.
    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    /// Timers waiting for admission at the next tick.
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Ticks processed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.pending.borrow().is_empty()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerManager {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Clonable handle for registering timers while the manager is mid-tick.
///
/// Completion callbacks cannot hold a manager reference (the manager is
/// exclusively borrowed for the duration of the tick), so they capture a
/// `Registrar` instead. Registered timers land in the same pending buffer
/// and are admitted at the start of the next tick.
#[derive(Clone)]
pub struct Registrar {
    pending: PendingQueue,
}

impl Registrar {
    pub fn register(&self, timer: impl Timer + 'static) {
        let mut pending = self.pending.borrow_mut();
        pending.push(Box::new(timer));
        debug!(pending = pending.len(), "Timer registered");
    }
}
