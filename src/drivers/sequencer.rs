//! Fixed-step output sequencing.
//!
//! A [`Sequencer`] turns a pending unit count into a stream of output
//! patterns, one per call to [`Sequencer::advance`]. The [`Executor`] calls
//! it at a paced interval from the timer interrupt and writes the patterns
//! into an [`OutputNibble`].

use crate::os::Pacer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// What the outputs do once the pending count runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleOutput {
    /// Leave the last pattern on the pins
    Hold,
    /// Clear the pins one interval after the final unit
    Release,
}

pub trait Sequencer {
    /// Replace the pending count. Never accumulates.
    fn arm(&mut self, units: u16);

    /// Do one step of work. Returns the pattern to write, if it changes.
    fn advance(&mut self) -> Option<u8>;

    fn pending(&self) -> u16;

    /// Nothing pending and no final pattern left to write.
    fn is_idle(&self) -> bool;
}

/// Four output lines sharing one port, written under a mask.
pub trait OutputNibble {
    const MASK: u8 = 0x0F;

    /// Replace the masked bits with `bits`; other port bits are kept.
    fn write_nibble(&mut self, bits: u8);
}

/// Couples a sequencer, its pacing and its output port.
pub struct Executor<S, O> {
    sequencer: S,
    pacer: Pacer,
    output: O,
}

impl<S: Sequencer, O: OutputNibble> Executor<S, O> {
    pub fn new(sequencer: S, ticks_per_step: u8, mut output: O) -> Self {
        output.write_nibble(0);
        Self {
            sequencer,
            pacer: Pacer::new(ticks_per_step),
            output,
        }
    }

    /// Call once per timer tick.
    ///
    /// Returns `true` when this tick wrote a new pattern.
    pub fn tick(&mut self) -> bool {
        if !self.pacer.due(!self.sequencer.is_idle()) {
            return false;
        }
        match self.sequencer.advance() {
            Some(pattern) => {
                self.output.write_nibble(pattern & O::MASK);
                true
            }
            None => false,
        }
    }

    pub fn arm(&mut self, units: u16) {
        self.sequencer.arm(units);
    }

    pub fn is_idle(&self) -> bool {
        self.sequencer.is_idle()
    }

    pub fn sequencer(&self) -> &S {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut S {
        &mut self.sequencer
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::OutputNibble;

    /// Records every nibble written.
    #[derive(Default, Debug)]
    pub struct RecordingPort {
        pub port: u8,
        pub writes: Vec<u8>,
    }

    impl RecordingPort {
        pub fn with_port(port: u8) -> Self {
            Self {
                port,
                writes: Vec::new(),
            }
        }
    }

    impl OutputNibble for RecordingPort {
        fn write_nibble(&mut self, bits: u8) {
            self.port = (self.port & !Self::MASK) | (bits & Self::MASK);
            self.writes.push(bits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingPort;
    use super::*;

    /// Emits its unit number, counting down.
    struct Countdown {
        pending: u16,
    }

    impl Sequencer for Countdown {
        fn arm(&mut self, units: u16) {
            self.pending = units;
        }

        fn advance(&mut self) -> Option<u8> {
            if self.pending == 0 {
                return None;
            }
            self.pending -= 1;
            Some(self.pending as u8)
        }

        fn pending(&self) -> u16 {
            self.pending
        }

        fn is_idle(&self) -> bool {
            self.pending == 0
        }
    }

    #[test]
    fn executor_clears_outputs_on_start() {
        let executor = Executor::new(Countdown { pending: 0 }, 1, RecordingPort::with_port(0xFF));
        assert_eq!(executor.output().port, 0xF0);
        assert_eq!(executor.output().writes, [0]);
    }

    #[test]
    fn executor_paces_units() {
        let mut executor = Executor::new(Countdown { pending: 0 }, 3, RecordingPort::default());
        executor.arm(2);

        let written: Vec<bool> = (0..8).map(|_| executor.tick()).collect();
        assert_eq!(written, [false, false, true, false, false, true, false, false]);
        assert_eq!(executor.output().writes, [0, 1, 0]);
        assert!(executor.is_idle());
    }

    #[test]
    fn executor_masks_patterns() {
        let mut executor = Executor::new(Countdown { pending: 0 }, 1, RecordingPort::with_port(0xA0));
        executor.arm(0x20);
        executor.tick();
        assert_eq!(executor.output().port, 0xAF);
    }

    #[test]
    fn direction_opposite() {
        assert_eq!(Direction::Forward.opposite(), Direction::Reverse);
        assert_eq!(Direction::Reverse.opposite(), Direction::Forward);
    }
}
