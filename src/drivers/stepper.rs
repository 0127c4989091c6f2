//! Unipolar stepper driven in full steps from four port lines.

use super::sequencer::{Direction, IdleOutput, Sequencer};

/// One coil energised per phase.
pub const FULL_STEP: [u8; 4] = [0x01, 0x02, 0x04, 0x08];

pub struct StepperSequencer {
    phase: u8,
    pending: u16,
    direction: Direction,
    idle_output: IdleOutput,
    release_due: bool,
}

impl StepperSequencer {
    pub const fn new(idle_output: IdleOutput) -> Self {
        Self {
            phase: 0,
            pending: 0,
            direction: Direction::Forward,
            idle_output,
            release_due: false,
        }
    }

    /// Applies from the next step on.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Index of the coil pattern last written.
    pub fn phase(&self) -> u8 {
        self.phase
    }
}

impl Sequencer for StepperSequencer {
    fn arm(&mut self, steps: u16) {
        self.pending = steps;
        if steps > 0 {
            self.release_due = false;
        } else {
            self.release_due = self.idle_output == IdleOutput::Release;
        }
    }

    fn advance(&mut self) -> Option<u8> {
        if self.pending == 0 {
            if self.release_due {
                self.release_due = false;
                return Some(0);
            }
            return None;
        }

        self.phase = match self.direction {
            Direction::Forward => (self.phase + 1) & 0x03,
            Direction::Reverse => self.phase.wrapping_sub(1) & 0x03,
        };
        self.pending -= 1;
        if self.pending == 0 {
            self.release_due = self.idle_output == IdleOutput::Release;
        }

        Some(FULL_STEP[self.phase as usize])
    }

    fn pending(&self) -> u16 {
        self.pending
    }

    fn is_idle(&self) -> bool {
        self.pending == 0 && !self.release_due
    }
}
