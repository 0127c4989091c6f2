use crate::config::DEBOUNCE_SAMPLES;
use embedded_hal::digital::v2::InputPin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
    Released,
}

/// Run-length debounce filter, fed one raw sample per tick.
///
/// The debounced level follows the raw level once `threshold` samples in a
/// row have matched the one before them.
#[derive(Clone, Debug)]
pub struct Debouncer {
    last_sample: bool,
    stable_count: u8,
    pressed: bool,
    threshold: u8,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self::with_threshold(DEBOUNCE_SAMPLES)
    }

    pub const fn with_threshold(threshold: u8) -> Self {
        Self {
            last_sample: false,
            stable_count: 0,
            pressed: false,
            threshold,
        }
    }

    /// Feed one raw sample (`true` = pressed).
    pub fn update(&mut self, sample: bool) -> Option<ButtonEvent> {
        if sample != self.last_sample {
            self.stable_count = 0;
        } else if self.stable_count < self.threshold {
            self.stable_count += 1;
        }
        self.last_sample = sample;

        if self.stable_count < self.threshold || sample == self.pressed {
            return None;
        }

        self.pressed = sample;
        Some(if sample {
            ButtonEvent::Pressed
        } else {
            ButtonEvent::Released
        })
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Raw and debounced levels agree and the run-length is saturated.
    pub fn is_settled(&self) -> bool {
        self.last_sample == self.pressed && self.stable_count >= self.threshold
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// Active-low push button behind an internal pull-up.
pub struct ButtonHandler<P> {
    pin: P,
    debouncer: Debouncer,
}

impl<P: InputPin> ButtonHandler<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            debouncer: Debouncer::new(),
        }
    }

    /// Sample the pin once; call at a fixed cadence.
    pub fn poll(&mut self) -> Result<Option<ButtonEvent>, P::Error> {
        let raw = self.pin.is_low()?;
        Ok(self.debouncer.update(raw))
    }

    pub fn is_pressed(&self) -> bool {
        self.debouncer.is_pressed()
    }

    pub fn is_settled(&self) -> bool {
        self.debouncer.is_settled()
    }

    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    fn feed(debouncer: &mut Debouncer, samples: &[bool]) -> Vec<ButtonEvent> {
        samples.iter().filter_map(|&s| debouncer.update(s)).collect()
    }

    #[test]
    fn starts_released() {
        let debouncer = Debouncer::new();
        assert!(!debouncer.is_pressed());
        assert!(!debouncer.is_settled());
    }

    #[test]
    fn press_commits_after_threshold_matching_samples() {
        let mut debouncer = Debouncer::new();
        // first low sample resets the run, five more saturate it
        for _ in 0..5 {
            assert_eq!(debouncer.update(true), None);
        }
        assert_eq!(debouncer.update(true), Some(ButtonEvent::Pressed));
        assert!(debouncer.is_pressed());
    }

    #[test]
    fn one_event_per_stable_press() {
        let mut debouncer = Debouncer::new();
        let events = feed(&mut debouncer, &[true; 40]);
        assert_eq!(events, [ButtonEvent::Pressed]);
    }

    #[test]
    fn bounce_shorter_than_threshold_is_ignored() {
        let mut debouncer = Debouncer::new();
        let chatter = [true, false, true, true, false, true, true, true, false];
        assert!(feed(&mut debouncer, &chatter).is_empty());
        assert!(!debouncer.is_pressed());
    }

    #[test]
    fn bouncy_press_then_release() {
        let mut debouncer = Debouncer::new();
        let mut samples = vec![true, false, true, false];
        samples.extend([true; 8]);
        samples.extend([false, true, false]);
        samples.extend([false; 8]);

        let events = feed(&mut debouncer, &samples);
        assert_eq!(events, [ButtonEvent::Pressed, ButtonEvent::Released]);
        assert!(!debouncer.is_pressed());
        assert!(debouncer.is_settled());
    }

    #[test]
    fn glitch_while_held_does_not_release() {
        let mut debouncer = Debouncer::new();
        feed(&mut debouncer, &[true; 10]);
        let events = feed(&mut debouncer, &[false, false, true, true, true]);
        assert!(events.is_empty());
        assert!(debouncer.is_pressed());
    }

    #[test]
    fn custom_threshold() {
        let mut debouncer = Debouncer::with_threshold(2);
        assert_eq!(debouncer.update(true), None);
        assert_eq!(debouncer.update(true), None);
        assert_eq!(debouncer.update(true), Some(ButtonEvent::Pressed));
    }

    #[test]
    fn handler_reads_active_low_pin() {
        let expectations: Vec<Transaction> = (0..3)
            .map(|_| Transaction::get(State::High))
            .chain((0..6).map(|_| Transaction::get(State::Low)))
            .collect();
        let pin = PinMock::new(&expectations);

        let mut button = ButtonHandler::new(pin);
        let mut events = Vec::new();
        for _ in 0..9 {
            if let Some(event) = button.poll().unwrap() {
                events.push(event);
            }
        }

        assert_eq!(events, [ButtonEvent::Pressed]);
        assert!(button.is_pressed());
        button.release().done();
    }
}
