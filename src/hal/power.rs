use avr_device::atmega328p::CPU;

/// SM2:0 values for SMCR.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum SleepMode {
    /// Timers keep running
    Idle = 0,
    /// Only pin changes and external interrupts wake the core
    PowerDown = 2,
}

const SE: u8 = 1 << 0;
const SM_MASK: u8 = 0x0E;

pub struct Power {
    cpu: CPU,
}

impl Power {
    pub fn new(cpu: CPU) -> Self {
        Self { cpu }
    }

    #[inline]
    pub fn set_sleep_mode(&mut self, mode: SleepMode) {
        unsafe {
            self.cpu
                .smcr
                .modify(|r, w| w.bits((r.bits() & !SM_MASK) | ((mode as u8) << 1)));
        }
    }

    #[inline]
    pub fn enable_sleep(&mut self) {
        unsafe {
            self.cpu.smcr.modify(|r, w| w.bits(r.bits() | SE));
        }
    }

    #[inline]
    pub fn disable_sleep(&mut self) {
        unsafe {
            self.cpu.smcr.modify(|r, w| w.bits(r.bits() & !SE));
        }
    }

    #[inline]
    #[allow(unused_unsafe)]
    pub fn sleep(&mut self) {
        unsafe { avr_device::asm::sleep() }
    }

    /// Sleep until the next interrupt; the timers keep running.
    pub fn enter_idle_mode(&mut self) {
        self.set_sleep_mode(SleepMode::Idle);
        self.enable_sleep();
        self.sleep();
        self.disable_sleep();
    }

    /// Enable interrupts and sleep in one step.
    ///
    /// SEI takes effect after the following instruction, so an interrupt
    /// that became pending while the caller decided to sleep still wakes
    /// the core instead of being serviced just before SLEEP.
    ///
    /// # Safety
    ///
    /// Call with interrupts disabled and no critical-section borrow alive;
    /// interrupts are left enabled on return.
    #[allow(unused_unsafe)]
    pub unsafe fn enable_interrupts_and_sleep(&mut self, mode: SleepMode) {
        self.set_sleep_mode(mode);
        self.enable_sleep();
        unsafe {
            avr_device::interrupt::enable();
            avr_device::asm::sleep();
        }
        self.disable_sleep();
    }
}
