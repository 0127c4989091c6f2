//! Two blinking indicators and a button that turns the stepper 90 degrees.
//!
//! Timer0 overflows every 10 ms and runs the button filter, the stepper and
//! the 500 ms LED. Timer1 overflows every second and flips the other LED.
//! The main loop only reports events on the console and sleeps.
#![cfg_attr(target_arch = "avr", no_std, no_main, feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use avr_coursework_firmware::config::{
        BLINK_TICKS, FAST_TICK_PRELOAD, ROTATE_STEPS, SLOW_BLINK_TICKS, SLOW_TICK_PRELOAD,
        STEP_INTERVAL_TICKS, TIMER_PRESCALER,
    };
    use avr_coursework_firmware::drivers::{
        Blinker, ButtonEvent, ButtonHandler, Executor, IdleOutput, SerialConsole, StepperSequencer,
    };
    use avr_coursework_firmware::hal::{
        Input, LowNibble, Output, Pin, Pins, Power, PullUp, Timer0, Timer1, UnwrapInfallible,
        Usart0,
    };
    use avr_device::atmega328p::{Peripherals, PORTB, PORTC, PORTD};
    use avr_device::interrupt::{self, Mutex};
    use core::cell::{Cell, RefCell};
    use panic_halt as _;
    use ufmt::uwrite;

    type FastLed = Pin<PORTD, 3, Output>;
    type SlowLed = Pin<PORTD, 5, Output>;
    type RotateButton = Pin<PORTC, 2, Input<PullUp>>;

    struct FastTick {
        timer: Timer0,
        led: Blinker<FastLed>,
        button: ButtonHandler<RotateButton>,
        stepper: Executor<StepperSequencer, LowNibble<PORTB>>,
    }

    struct SlowTick {
        timer: Timer1,
        led: Blinker<SlowLed>,
    }

    #[derive(Clone, Copy)]
    enum Report {
        Button(ButtonEvent),
        MoveDone,
    }

    static FAST_TICK: Mutex<RefCell<Option<FastTick>>> = Mutex::new(RefCell::new(None));
    static SLOW_TICK: Mutex<RefCell<Option<SlowTick>>> = Mutex::new(RefCell::new(None));
    // one slot; the console only needs the latest report
    static REPORT: Mutex<Cell<Option<Report>>> = Mutex::new(Cell::new(None));

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();
        let pins = Pins::new(dp.PORTB, dp.PORTC, dp.PORTD);

        let mut console = SerialConsole::new(Usart0::new(dp.USART0));
        let mut power = Power::new(dp.CPU);

        let coils = LowNibble::new(
            pins.pb0.into_output(),
            pins.pb1.into_output(),
            pins.pb2.into_output(),
            pins.pb3.into_output(),
        );
        let stepper = Executor::new(
            StepperSequencer::new(IdleOutput::Release),
            STEP_INTERVAL_TICKS,
            coils,
        );

        let fast_led = Blinker::new(pins.pd3.into_output(), BLINK_TICKS).unwrap_infallible();
        let slow_led = Blinker::new(pins.pd5.into_output(), SLOW_BLINK_TICKS).unwrap_infallible();
        let button = ButtonHandler::new(pins.pc2.into_pull_up_input());

        let mut fast_timer = Timer0::new(dp.TC0, TIMER_PRESCALER, FAST_TICK_PRELOAD);
        let mut slow_timer = Timer1::new(dp.TC1, TIMER_PRESCALER, SLOW_TICK_PRELOAD);
        fast_timer.enable_overflow_interrupt();
        slow_timer.enable_overflow_interrupt();

        interrupt::free(|cs| {
            FAST_TICK.borrow(cs).replace(Some(FastTick {
                timer: fast_timer,
                led: fast_led,
                button,
                stepper,
            }));
            SLOW_TICK.borrow(cs).replace(Some(SlowTick {
                timer: slow_timer,
                led: slow_led,
            }));
        });

        console.write_line("stepper_blink ready").unwrap_infallible();
        console.debug("Steps per press", ROTATE_STEPS as u8).unwrap_infallible();

        // Enable interrupts globally
        unsafe { interrupt::enable() };

        loop {
            let report = interrupt::free(|cs| REPORT.borrow(cs).take());
            match report {
                Some(Report::Button(ButtonEvent::Pressed)) => {
                    uwrite!(&mut console, "[DBG] Rotate: {} steps\r\n", ROTATE_STEPS)
                        .unwrap_infallible();
                }
                Some(Report::Button(ButtonEvent::Released)) if cfg!(feature = "debug") => {
                    uwrite!(&mut console, "[DBG] Button released\r\n").unwrap_infallible();
                }
                Some(Report::MoveDone) => {
                    uwrite!(&mut console, "[DBG] Coils released\r\n").unwrap_infallible();
                }
                _ => {}
            }

            power.enter_idle_mode();
        }
    }

    #[avr_device::interrupt(atmega328p)]
    fn TIMER0_OVF() {
        interrupt::free(|cs| {
            let mut fast = FAST_TICK.borrow(cs).borrow_mut();
            let Some(tick) = fast.as_mut() else {
                return;
            };
            tick.timer.reload();

            if let Some(event) = tick.button.poll().unwrap_infallible() {
                if event == ButtonEvent::Pressed {
                    tick.stepper.arm(ROTATE_STEPS);
                }
                REPORT.borrow(cs).set(Some(Report::Button(event)));
            }

            let was_busy = !tick.stepper.is_idle();
            tick.stepper.tick();
            if was_busy && tick.stepper.is_idle() {
                REPORT.borrow(cs).set(Some(Report::MoveDone));
            }

            tick.led.tick().unwrap_infallible();
        });
    }

    #[avr_device::interrupt(atmega328p)]
    fn TIMER1_OVF() {
        interrupt::free(|cs| {
            if let Some(tick) = SLOW_TICK.borrow(cs).borrow_mut().as_mut() {
                tick.timer.reload();
                tick.led.tick().unwrap_infallible();
            }
        });
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("stepper_blink runs on the ATmega328P; build it for an AVR target");
}
