use crate::config::{CPU_FREQ_HZ, UART_BAUD};
use avr_device::atmega328p::USART0;
use core::convert::Infallible;
use embedded_hal::serial::Write;

const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

const UDRE0: u8 = 1 << 5;
const TXEN0: u8 = 1 << 3;
// UCSZ01:0 = 0b11, 8N1
const FRAME_8N1: u8 = 0b0000_0110;

/// Transmit-only USART0 at [`UART_BAUD`]; PD0 stays free for GPIO.
pub struct Usart0 {
    usart: USART0,
}

impl Usart0 {
    pub fn new(usart: USART0) -> Self {
        unsafe {
            usart.ubrr0.write(|w| w.bits(UBRR));
            usart.ucsr0a.write(|w| w.bits(0));
            usart.ucsr0c.write(|w| w.bits(FRAME_8N1));
            usart.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { usart }
    }
}

impl Write<u8> for Usart0 {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        unsafe {
            self.usart.udr0.write(|w| w.bits(byte));
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}
