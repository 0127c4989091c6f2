//! Tick bookkeeping shared by the timer interrupt handlers

/// Counts timer ticks and fires once every `threshold` ticks.
#[derive(Debug, Clone)]
pub struct TickCounter {
    count: u8,
    threshold: u8,
}

impl TickCounter {
    /// `threshold` of zero is treated as one.
    pub const fn new(threshold: u8) -> Self {
        Self {
            count: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Advance by one tick; returns `true` on the tick that reaches the threshold.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Paces output work: one unit every `interval` ticks, but only while work is pending.
///
/// The phase is kept when work runs out, so a re-armed sequence may run its
/// first unit earlier than a full interval.
#[derive(Debug, Clone)]
pub struct Pacer {
    elapsed: u8,
    interval: u8,
}

impl Pacer {
    pub const fn new(interval: u8) -> Self {
        Self {
            elapsed: 0,
            interval: if interval == 0 { 1 } else { interval },
        }
    }

    /// Returns `true` when a unit of work is due on this tick.
    #[inline]
    pub fn due(&mut self, busy: bool) -> bool {
        if !busy {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.interval {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> u8 {
        self.interval
    }
}
