//! Typestate GPIO for the ATmega328P ports.
//!
//! Each pin is its own zero-sized type; the mode lives in the type so a pin
//! configured as an input can never be driven. Register access goes through
//! the `avr-device` register blocks.

use crate::drivers::OutputNibble;
use avr_device::atmega328p::{PORTB, PORTC, PORTD};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

pub struct Floating;
pub struct PullUp;

pub struct Input<PULL> {
    _pull: PhantomData<PULL>,
}
pub struct Output;

pub struct Pin<PORT, const P: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Pin<PORT, P, MODE> {
    const MASK: u8 = 1 << P;

    const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

/// Bits 0..3 of one port, driven together.
pub struct LowNibble<PORT> {
    _port: PhantomData<PORT>,
}

macro_rules! impl_port {
    ($PORT:ident, $pin:ident, $ddr:ident, $port:ident) => {
        impl<const P: u8, MODE> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | Self::MASK));
                }
                Pin::new()
            }

            /// Output that starts high, without a low glitch.
            pub fn into_output_high(self) -> Pin<$PORT, P, Output> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | Self::MASK));
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | Self::MASK));
                }
                Pin::new()
            }

            pub fn into_pull_up_input(self) -> Pin<$PORT, P, Input<PullUp>> {
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | Self::MASK));
                }
                Pin::new()
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            #[inline]
            fn set_high(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | Self::MASK));
                }
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                }
                Ok(())
            }
        }

        impl<const P: u8> StatefulOutputPin for Pin<$PORT, P, Output> {
            #[inline]
            fn is_set_high(&self) -> Result<bool, Infallible> {
                Ok(unsafe { (*$PORT::ptr()).$port.read().bits() } & Self::MASK != 0)
            }

            #[inline]
            fn is_set_low(&self) -> Result<bool, Infallible> {
                self.is_set_high().map(|high| !high)
            }
        }

        impl<const P: u8> ToggleableOutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            /// Writing a one to PINx flips PORTx in a single cycle.
            #[inline]
            fn toggle(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$pin.write(|w| w.bits(Self::MASK));
                }
                Ok(())
            }
        }

        impl<const P: u8, PULL> InputPin for Pin<$PORT, P, Input<PULL>> {
            type Error = Infallible;

            #[inline]
            fn is_high(&self) -> Result<bool, Infallible> {
                Ok(unsafe { (*$PORT::ptr()).$pin.read().bits() } & Self::MASK != 0)
            }

            #[inline]
            fn is_low(&self) -> Result<bool, Infallible> {
                self.is_high().map(|high| !high)
            }
        }

        impl LowNibble<$PORT> {
            pub fn new(
                _p0: Pin<$PORT, 0, Output>,
                _p1: Pin<$PORT, 1, Output>,
                _p2: Pin<$PORT, 2, Output>,
                _p3: Pin<$PORT, 3, Output>,
            ) -> Self {
                LowNibble {
                    _port: PhantomData,
                }
            }
        }

        impl OutputNibble for LowNibble<$PORT> {
            #[inline]
            fn write_nibble(&mut self, bits: u8) {
                unsafe {
                    (*$PORT::ptr())
                        .$port
                        .modify(|r, w| w.bits((r.bits() & !Self::MASK) | (bits & Self::MASK)));
                }
            }
        }
    };
}

impl_port!(PORTB, pinb, ddrb, portb);
impl_port!(PORTC, pinc, ddrc, portc);
impl_port!(PORTD, pind, ddrd, portd);

/// Every GPIO in its reset state (floating input).
pub struct Pins {
    pub pb0: Pin<PORTB, 0, Input<Floating>>,
    pub pb1: Pin<PORTB, 1, Input<Floating>>,
    pub pb2: Pin<PORTB, 2, Input<Floating>>,
    pub pb3: Pin<PORTB, 3, Input<Floating>>,
    pub pb4: Pin<PORTB, 4, Input<Floating>>,
    pub pb5: Pin<PORTB, 5, Input<Floating>>,
    pub pb6: Pin<PORTB, 6, Input<Floating>>,
    pub pb7: Pin<PORTB, 7, Input<Floating>>,
    pub pc0: Pin<PORTC, 0, Input<Floating>>,
    pub pc1: Pin<PORTC, 1, Input<Floating>>,
    pub pc2: Pin<PORTC, 2, Input<Floating>>,
    pub pc3: Pin<PORTC, 3, Input<Floating>>,
    pub pc4: Pin<PORTC, 4, Input<Floating>>,
    pub pc5: Pin<PORTC, 5, Input<Floating>>,
    pub pc6: Pin<PORTC, 6, Input<Floating>>,
    pub pd0: Pin<PORTD, 0, Input<Floating>>,
    pub pd1: Pin<PORTD, 1, Input<Floating>>,
    pub pd2: Pin<PORTD, 2, Input<Floating>>,
    pub pd3: Pin<PORTD, 3, Input<Floating>>,
    pub pd4: Pin<PORTD, 4, Input<Floating>>,
    pub pd5: Pin<PORTD, 5, Input<Floating>>,
    pub pd6: Pin<PORTD, 6, Input<Floating>>,
    pub pd7: Pin<PORTD, 7, Input<Floating>>,
}

impl Pins {
    pub fn new(_portb: PORTB, _portc: PORTC, _portd: PORTD) -> Self {
        Self {
            pb0: Pin::new(),
            pb1: Pin::new(),
            pb2: Pin::new(),
            pb3: Pin::new(),
            pb4: Pin::new(),
            pb5: Pin::new(),
            pb6: Pin::new(),
            pb7: Pin::new(),
            pc0: Pin::new(),
            pc1: Pin::new(),
            pc2: Pin::new(),
            pc3: Pin::new(),
            pc4: Pin::new(),
            pc5: Pin::new(),
            pc6: Pin::new(),
            pd0: Pin::new(),
            pd1: Pin::new(),
            pd2: Pin::new(),
            pd3: Pin::new(),
            pd4: Pin::new(),
            pd5: Pin::new(),
            pd6: Pin::new(),
            pd7: Pin::new(),
        }
    }
}
