//! Identify action
//!
//! Writing the identify characteristic asks the accessory to show itself,
//! usually by blinking. The write handler only fires an [`IdentifyHandler`];
//! the blink itself belongs to the render loop.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_time::{Duration, Instant};

/// Callback fired once per identify trigger.
///
/// Called from the protocol context, so it must return quickly and never
/// block.
pub trait IdentifyHandler {
    fn identify(&self);
}

impl<F: Fn()> IdentifyHandler for F {
    fn identify(&self) {
        self();
    }
}

/// Identify handler that records triggers for the render loop.
///
/// The protocol side counts triggers, the render loop drains them with
/// [`take`](Self::take) and starts an [`IdentifyBlink`].
#[derive(Debug, Default)]
pub struct IdentifyRequest {
    pending: AtomicU32,
}

impl IdentifyRequest {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU32::new(0),
        }
    }

    /// Number of triggers not yet taken
    pub fn pending(&self) -> u32 {
        self.pending.load(Ordering::Acquire)
    }

    /// Take all pending triggers, returns how many there were
    pub fn take(&self) -> u32 {
        self.pending.swap(0, Ordering::AcqRel)
    }
}

impl IdentifyHandler for IdentifyRequest {
    fn identify(&self) {
        self.pending.fetch_add(1, Ordering::AcqRel);
    }
}

/// Default number of blinks
pub const DEFAULT_BLINKS: u8 = 3;

/// Default length of each on and off phase
pub const DEFAULT_BLINK_PHASE: Duration = Duration::from_millis(250);

/// Time-based blink pattern for identification.
///
/// The strip is lit for one phase, dark for the next, `blinks` times.
#[derive(Debug, Clone, Copy)]
pub struct IdentifyBlink {
    start: Instant,
    phase: Duration,
    blinks: u8,
}

impl IdentifyBlink {
    /// Start the default pattern at `start`
    pub const fn new(start: Instant) -> Self {
        Self::with_pattern(start, DEFAULT_BLINKS, DEFAULT_BLINK_PHASE)
    }

    pub const fn with_pattern(start: Instant, blinks: u8, phase: Duration) -> Self {
        Self {
            start,
            phase,
            blinks,
        }
    }

    /// Total length of the pattern
    pub fn duration(&self) -> Duration {
        let ticks = self
            .phase
            .as_ticks()
            .saturating_mul(2)
            .saturating_mul(u64::from(self.blinks));
        Duration::from_ticks(ticks)
    }

    /// Whether the pattern has played out at `now`
    pub fn is_finished(&self, now: Instant) -> bool {
        now.checked_duration_since(self.start)
            .is_some_and(|elapsed| elapsed >= self.duration())
    }

    /// Whether the strip should be lit at `now`
    pub fn is_lit(&self, now: Instant) -> bool {
        let Some(elapsed) = now.checked_duration_since(self.start) else {
            return false;
        };
        if self.phase.as_ticks() == 0 || elapsed >= self.duration() {
            return false;
        }
        (elapsed.as_ticks() / self.phase.as_ticks()).is_multiple_of(2)
    }
}
