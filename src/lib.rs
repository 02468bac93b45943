//! Per-frame timer scheduling for game and application loops.
//!
//! Callers create timers (a duration plus a completion callback, or a
//! frame-count delay) and hand them to a [`TimerManager`]. The host calls
//! [`TimerManager::tick`] once per frame; the manager updates every live
//! timer and drops the finished ones.
//!
//! ```text
//! register(timer) ──▶ pending ──(next tick)──▶ live ──▶ update() each tick
//!                                               │
//!                                               └──▶ removed once done
//! ```
//!
//! Registration is deferred by one tick, so callbacks can safely schedule
//! follow-up timers mid-dispatch through a [`Registrar`]. Time comes from a
//! [`FrameClock`] the host advances each frame; the manager itself never
//! supplies time.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tempo::{CountdownTimer, TimerManager};
//!
//! let mut manager = TimerManager::new();
//!
//! let timer = CountdownTimer::new(manager.clock(), Duration::from_secs(1), || {
//!     println!("fired");
//! });
//! let handle = timer.handle();
//! manager.register(timer);
//!
//! // Host frame loop: advance the clock, then tick the manager.
//! manager.clock().advance(Duration::from_millis(600));
//! manager.tick();
//! manager.clock().advance(Duration::from_millis(600));
//! manager.tick();
//!
//! assert!(handle.is_done());
//! assert!(manager.is_empty());
//! ```

pub mod clock;
pub mod countdown;
pub mod delay;
pub mod manager;
pub mod settings;
pub mod timer;


// Re-exports for convenience
pub use clock::FrameClock;
pub use countdown::{CountdownHandle, CountdownTimer};
pub use delay::FrameDelay;
pub use manager::{Registrar, TimerManager};
pub use settings::{BulkScope, ManagerSettings, SettingsError};
pub use timer::{Timer, TimerState};
