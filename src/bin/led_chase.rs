//! Four-LED chase on the segment lines of a 7-segment display.
//!
//! Either button on PC2/PC3 arms 128 sweeps; the button on PB2 picks the
//! direction while held. Timer0 samples all three every 10 ms through the
//! debounce filter and paces the sweep at one LED per tick. With nothing
//! running the core powers down, and the pin-change vectors wake it.
#![cfg_attr(target_arch = "avr", no_std, no_main, feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use avr_coursework_firmware::config::{
        CHASE_PULSE_TICKS, CHASE_SWEEPS, FAST_TICK_PRELOAD, TIMER_PRESCALER,
    };
    use avr_coursework_firmware::drivers::{ChaseButtons, ChaseSequencer, Executor};
    use avr_coursework_firmware::hal::{
        Input, LowNibble, Pin, PinChange, PinChangeBank, Pins, Power, PullUp, SleepMode, Timer0,
        UnwrapInfallible,
    };
    use avr_device::atmega328p::{Peripherals, PORTB, PORTC, PORTD};
    use avr_device::interrupt::{self, Mutex};
    use core::cell::RefCell;
    use panic_halt as _;

    type ArmA = Pin<PORTC, 2, Input<PullUp>>;
    type ArmB = Pin<PORTC, 3, Input<PullUp>>;
    type DirectionButton = Pin<PORTB, 2, Input<PullUp>>;

    struct Chase {
        timer: Timer0,
        executor: Executor<ChaseSequencer, LowNibble<PORTD>>,
        buttons: ChaseButtons<ArmA, ArmB, DirectionButton>,
        // set by a pin change, cleared once the filters settle again
        pin_activity: bool,
    }

    impl Chase {
        fn is_quiescent(&self) -> bool {
            !self.pin_activity && self.executor.is_idle() && self.buttons.is_settled()
        }
    }

    static CHASE: Mutex<RefCell<Option<Chase>>> = Mutex::new(RefCell::new(None));

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();
        let pins = Pins::new(dp.PORTB, dp.PORTC, dp.PORTD);
        let mut power = Power::new(dp.CPU);

        // display common driver stays on
        let _display = pins.pb0.into_output_high();

        let leds = LowNibble::new(
            pins.pd0.into_output(),
            pins.pd1.into_output(),
            pins.pd2.into_output(),
            pins.pd3.into_output(),
        );
        let executor = Executor::new(ChaseSequencer::new(), CHASE_PULSE_TICKS, leds);

        let buttons = ChaseButtons::new(
            pins.pc2.into_pull_up_input(),
            pins.pc3.into_pull_up_input(),
            pins.pb2.into_pull_up_input(),
        );

        let mut timer = Timer0::new(dp.TC0, TIMER_PRESCALER, FAST_TICK_PRELOAD);
        timer.enable_overflow_interrupt();

        let mut pin_change = PinChange::new(dp.EXINT);
        pin_change.enable(PinChangeBank::PortB, 1 << 2);
        pin_change.enable(PinChangeBank::PortC, (1 << 2) | (1 << 3));

        interrupt::free(|cs| {
            CHASE.borrow(cs).replace(Some(Chase {
                timer,
                executor,
                buttons,
                pin_activity: true,
            }));
        });

        loop {
            interrupt::free(|cs| {
                let quiet = CHASE
                    .borrow(cs)
                    .borrow()
                    .as_ref()
                    .map_or(false, Chase::is_quiescent);
                let mode = if quiet {
                    SleepMode::PowerDown
                } else {
                    SleepMode::Idle
                };
                // interrupts come back on together with SLEEP; the flags
                // restored on leaving `free` keep them on
                unsafe { power.enable_interrupts_and_sleep(mode) };
            });
        }
    }

    fn wake() {
        interrupt::free(|cs| {
            if let Some(chase) = CHASE.borrow(cs).borrow_mut().as_mut() {
                chase.pin_activity = true;
            }
        });
    }

    #[avr_device::interrupt(atmega328p)]
    fn PCINT0() {
        wake();
    }

    #[avr_device::interrupt(atmega328p)]
    fn PCINT1() {
        wake();
    }

    #[avr_device::interrupt(atmega328p)]
    fn TIMER0_OVF() {
        interrupt::free(|cs| {
            if let Some(chase) = CHASE.borrow(cs).borrow_mut().as_mut() {
                chase.timer.reload();
                chase
                    .buttons
                    .poll(chase.executor.sequencer_mut(), CHASE_SWEEPS)
                    .unwrap_infallible();
                if chase.buttons.is_settled() {
                    chase.pin_activity = false;
                }
                chase.executor.tick();
            }
        });
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("led_chase runs on the ATmega328P; build it for an AVR target");
}
