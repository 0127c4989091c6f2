//! Running-light pattern across four LEDs.

use super::button_handler::{ButtonEvent, ButtonHandler};
use super::sequencer::{Direction, Sequencer};
use embedded_hal::digital::v2::InputPin;

/// LED0..LED3 on the low nibble.
pub const CHASE_ORDER: [u8; 4] = [0x01, 0x02, 0x04, 0x08];

/// Plays whole sweeps over [`CHASE_ORDER`], one lit LED per step.
///
/// One armed unit is a sweep of four pulses. The direction is read when a
/// sweep starts, so changing it mid-sweep takes effect on the next one.
pub struct ChaseSequencer {
    pending: u16,
    pulse: u8,
    direction: Direction,
    sweep_direction: Direction,
    lit: bool,
    dark_due: bool,
}

impl ChaseSequencer {
    pub const fn new() -> Self {
        Self {
            pending: 0,
            pulse: 0,
            direction: Direction::Reverse,
            sweep_direction: Direction::Reverse,
            lit: false,
            dark_due: false,
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Pulses already shown in the current sweep.
    pub fn pulse(&self) -> u8 {
        self.pulse
    }

}

impl Default for ChaseSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer for ChaseSequencer {
    fn arm(&mut self, sweeps: u16) {
        self.pending = sweeps;
        if sweeps > 0 {
            self.dark_due = false;
        } else {
            self.pulse = 0;
            self.dark_due = self.lit;
        }
    }

    fn advance(&mut self) -> Option<u8> {
        if self.pending == 0 {
            if self.dark_due {
                self.dark_due = false;
                self.lit = false;
                return Some(0);
            }
            return None;
        }

        if self.pulse == 0 {
            self.sweep_direction = self.direction;
        }
        let slot = match self.sweep_direction {
            Direction::Forward => self.pulse,
            Direction::Reverse => CHASE_ORDER.len() as u8 - 1 - self.pulse,
        };

        self.pulse += 1;
        if self.pulse as usize == CHASE_ORDER.len() {
            self.pulse = 0;
            self.pending -= 1;
            self.dark_due = self.pending == 0;
        }

        self.lit = true;
        Some(CHASE_ORDER[slot as usize])
    }

    fn pending(&self) -> u16 {
        self.pending
    }

    fn is_idle(&self) -> bool {
        self.pending == 0 && !self.dark_due
    }
}

/// The three chase buttons, sampled together on the fast tick.
///
/// A debounced press on either arm button restarts the countdown. The
/// direction follows the debounced level of its button: held runs forward.
pub struct ChaseButtons<A, B, D> {
    arm_a: ButtonHandler<A>,
    arm_b: ButtonHandler<B>,
    direction: ButtonHandler<D>,
}

impl<A, B, D, E> ChaseButtons<A, B, D>
where
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
    D: InputPin<Error = E>,
{
    pub fn new(arm_a: A, arm_b: B, direction: D) -> Self {
        Self {
            arm_a: ButtonHandler::new(arm_a),
            arm_b: ButtonHandler::new(arm_b),
            direction: ButtonHandler::new(direction),
        }
    }

    /// Sample every button once; returns `true` when the countdown was armed.
    pub fn poll(&mut self, chase: &mut ChaseSequencer, sweeps: u16) -> Result<bool, E> {
        match self.direction.poll()? {
            Some(ButtonEvent::Pressed) => chase.set_direction(Direction::Forward),
            Some(ButtonEvent::Released) => chase.set_direction(Direction::Reverse),
            None => {}
        }

        let a = self.arm_a.poll()?;
        let b = self.arm_b.poll()?;
        if a == Some(ButtonEvent::Pressed) || b == Some(ButtonEvent::Pressed) {
            chase.arm(sweeps);
            return Ok(true);
        }
        Ok(false)
    }

    /// Every filter has stopped counting; nothing changes until a pin does.
    pub fn is_settled(&self) -> bool {
        self.arm_a.is_settled() && self.arm_b.is_settled() && self.direction.is_settled()
    }
}
