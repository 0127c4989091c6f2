//! Overflow timers: reload arithmetic plus the Timer0/Timer1 drivers.

#[cfg(target_arch = "avr")]
use avr_device::atmega328p::{TC0, TC1};

/// Clock select bits (CSn2:0) shared by Timer0 and Timer1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Stop => 0,
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerWidth {
    Bits8,
    Bits16,
}

impl TimerWidth {
    const fn range(self) -> u32 {
        match self {
            TimerWidth::Bits8 => 1 << 8,
            TimerWidth::Bits16 => 1 << 16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerError {
    /// The prescaler stops the counter
    Stopped,
    /// Fewer than one count per period
    PeriodTooShort,
    /// More counts than the counter can hold
    PeriodTooLong,
}

/// Counter value to load so a normal-mode timer overflows after `period_us`.
///
/// The count is truncated, matching a hand-computed `TCNT` reload: 10 ms at
/// 16 MHz / 1024 is 156.25 counts and loads `256 - 156 = 100`.
pub const fn overflow_preload(
    cpu_hz: u32,
    prescaler: Prescaler,
    period_us: u32,
    width: TimerWidth,
) -> Result<u16, TimerError> {
    let divisor = prescaler.divisor();
    if divisor == 0 {
        return Err(TimerError::Stopped);
    }

    let counts = (cpu_hz as u64 * period_us as u64) / (divisor as u64 * 1_000_000);
    let range = width.range() as u64;

    if counts == 0 {
        Err(TimerError::PeriodTooShort)
    } else if counts > range {
        Err(TimerError::PeriodTooLong)
    } else {
        Ok(((range - counts) & 0xFFFF) as u16)
    }
}

#[cfg(target_arch = "avr")]
const TOIE: u8 = 1 << 0;

/// 8-bit Timer0 in normal mode, reloaded on every overflow.
#[cfg(target_arch = "avr")]
pub struct Timer0 {
    tc: TC0,
    preload: u8,
}

#[cfg(target_arch = "avr")]
impl Timer0 {
    pub fn new(tc: TC0, prescaler: Prescaler, preload: u8) -> Self {
        unsafe {
            tc.tccr0a.write(|w| w.bits(0));
            tc.tcnt0.write(|w| w.bits(preload));
            tc.tccr0b.write(|w| w.bits(prescaler.bits()));
        }
        Self { tc, preload }
    }

    pub fn enable_overflow_interrupt(&mut self) {
        unsafe {
            self.tc.timsk0.modify(|r, w| w.bits(r.bits() | TOIE));
        }
    }

    /// Call first thing in the overflow handler.
    #[inline]
    pub fn reload(&mut self) {
        unsafe {
            self.tc.tcnt0.write(|w| w.bits(self.preload));
        }
    }
}

/// 16-bit Timer1 in normal mode, reloaded on every overflow.
#[cfg(target_arch = "avr")]
pub struct Timer1 {
    tc: TC1,
    preload: u16,
}

#[cfg(target_arch = "avr")]
impl Timer1 {
    pub fn new(tc: TC1, prescaler: Prescaler, preload: u16) -> Self {
        unsafe {
            tc.tccr1a.write(|w| w.bits(0));
            tc.tcnt1.write(|w| w.bits(preload));
            tc.tccr1b.write(|w| w.bits(prescaler.bits()));
        }
        Self { tc, preload }
    }

    pub fn enable_overflow_interrupt(&mut self) {
        unsafe {
            self.tc.timsk1.modify(|r, w| w.bits(r.bits() | TOIE));
        }
    }

    #[inline]
    pub fn reload(&mut self) {
        // 16-bit write goes through TEMP; interrupts are already off in the ISR
        unsafe {
            self.tc.tcnt1.write(|w| w.bits(self.preload));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_millisecond_tick_on_timer0() {
        let preload = overflow_preload(16_000_000, Prescaler::Div1024, 10_000, TimerWidth::Bits8);
        assert_eq!(preload, Ok(100));
    }

    #[test]
    fn one_second_tick_on_timer1() {
        let preload =
            overflow_preload(16_000_000, Prescaler::Div1024, 1_000_000, TimerWidth::Bits16);
        assert_eq!(preload, Ok(49911));
    }

    #[test]
    fn full_range_period_loads_zero() {
        // 256 counts at 16 MHz / 64 is 1024 us
        let preload = overflow_preload(16_000_000, Prescaler::Div64, 1_024, TimerWidth::Bits8);
        assert_eq!(preload, Ok(0));
    }

    #[test]
    fn one_second_overflows_timer0() {
        let preload = overflow_preload(16_000_000, Prescaler::Div1024, 1_000_000, TimerWidth::Bits8);
        assert_eq!(preload, Err(TimerError::PeriodTooLong));
    }

    #[test]
    fn sub_count_period_rejected() {
        let preload = overflow_preload(16_000_000, Prescaler::Div1024, 10, TimerWidth::Bits16);
        assert_eq!(preload, Err(TimerError::PeriodTooShort));
    }

    #[test]
    fn stopped_prescaler_rejected() {
        let preload = overflow_preload(16_000_000, Prescaler::Stop, 10_000, TimerWidth::Bits8);
        assert_eq!(preload, Err(TimerError::Stopped));
    }
}
