pub mod timer;

#[cfg(target_arch = "avr")]
pub mod gpio;
#[cfg(target_arch = "avr")]
pub mod pcint;
#[cfg(target_arch = "avr")]
pub mod power;
#[cfg(target_arch = "avr")]
pub mod uart;

// Re-export commonly used types
#[cfg(target_arch = "avr")]
pub use gpio::{Input, LowNibble, Output, Pin, Pins, PullUp};
#[cfg(target_arch = "avr")]
pub use pcint::{PinChange, PinChangeBank};
#[cfg(target_arch = "avr")]
pub use power::{Power, SleepMode};
pub use timer::{overflow_preload, Prescaler, TimerError, TimerWidth};
#[cfg(target_arch = "avr")]
pub use timer::{Timer0, Timer1};
#[cfg(target_arch = "avr")]
pub use uart::Usart0;

/// Unwrap for results whose error type cannot be constructed.
pub trait UnwrapInfallible<T> {
    fn unwrap_infallible(self) -> T;
}

impl<T> UnwrapInfallible<T> for Result<T, core::convert::Infallible> {
    #[inline]
    fn unwrap_infallible(self) -> T {
        match self {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[test]
    fn unwraps_ok() {
        let value: Result<u8, Infallible> = Ok(7);
        assert_eq!(value.unwrap_infallible(), 7);
    }
}
