use crate::os::TickCounter;
use embedded_hal::digital::v2::OutputPin;

/// Indicator LED that flips every `threshold` ticks.
pub struct Blinker<P> {
    led: P,
    counter: TickCounter,
    lit: bool,
}

impl<P: OutputPin> Blinker<P> {
    /// Drives the LED low and starts counting from zero.
    pub fn new(mut led: P, threshold: u8) -> Result<Self, P::Error> {
        led.set_low()?;
        Ok(Self {
            led,
            counter: TickCounter::new(threshold),
            lit: false,
        })
    }

    /// Count one tick, toggling the LED when the period elapses.
    pub fn tick(&mut self) -> Result<bool, P::Error> {
        if self.counter.tick() {
            self.toggle()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn toggle(&mut self) -> Result<(), P::Error> {
        if self.lit {
            self.led.set_low()?;
        } else {
            self.led.set_high()?;
        }
        self.lit = !self.lit;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn release(self) -> P {
        self.led
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    #[test]
    fn toggles_every_threshold_ticks() {
        let pin = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ]);

        let mut blinker = Blinker::new(pin, 50).unwrap();
        let mut toggles = 0;
        for _ in 0..150 {
            if blinker.tick().unwrap() {
                toggles += 1;
            }
        }

        assert_eq!(toggles, 3);
        assert!(blinker.is_lit());
        blinker.release().done();
    }

    #[test]
    fn slow_indicator_flips_on_every_tick() {
        let pin = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]);

        let mut blinker = Blinker::new(pin, 1).unwrap();
        assert!(blinker.tick().unwrap());
        assert!(blinker.tick().unwrap());
        assert!(!blinker.is_lit());
        blinker.release().done();
    }
}
