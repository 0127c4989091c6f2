//! Configuration constants for the ATmega328P firmware

use crate::hal::timer::{overflow_preload, Prescaler, TimerWidth};

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Prescaler shared by both overflow timers (15 625 counts per second)
pub const TIMER_PRESCALER: Prescaler = Prescaler::Div1024;

/// Timer0 period; every sampling and sequencing interval is a multiple of it
pub const FAST_TICK_US: u32 = 10_000;

/// Timer1 period
pub const SLOW_TICK_US: u32 = 1_000_000;

pub const FAST_TICK_PRELOAD: u8 =
    match overflow_preload(CPU_FREQ_HZ, TIMER_PRESCALER, FAST_TICK_US, TimerWidth::Bits8) {
        Ok(preload) => preload as u8,
        Err(_) => panic!("fast tick does not fit Timer0"),
    };

pub const SLOW_TICK_PRELOAD: u16 =
    match overflow_preload(CPU_FREQ_HZ, TIMER_PRESCALER, SLOW_TICK_US, TimerWidth::Bits16) {
        Ok(preload) => preload,
        Err(_) => panic!("slow tick does not fit Timer1"),
    };

/// Fast ticks between toggles of the fast indicator (500 ms)
pub const BLINK_TICKS: u8 = 50;

/// Slow ticks between toggles of the slow indicator
pub const SLOW_BLINK_TICKS: u8 = 1;

/// Identical samples needed before the debounced level follows the pin
pub const DEBOUNCE_SAMPLES: u8 = 5;

/// Full steps per mechanical revolution of the stepper
pub const STEPS_PER_REV: u16 = 200;

/// Steps queued by one button press (90 degrees)
pub const ROTATE_STEPS: u16 = STEPS_PER_REV / 4;

/// Fast ticks per motor step (20 ms)
pub const STEP_INTERVAL_TICKS: u8 = 2;

/// Sweeps queued by a chase arm button
pub const CHASE_SWEEPS: u16 = 128;

/// Fast ticks each chase LED stays lit
pub const CHASE_PULSE_TICKS: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preloads_match_register_values() {
        assert_eq!(FAST_TICK_PRELOAD, 100);
        assert_eq!(SLOW_TICK_PRELOAD, 49911);
    }

    #[test]
    fn quarter_turn() {
        assert_eq!(ROTATE_STEPS, 50);
    }
}
