use avr_device::atmega328p::EXINT;

/// Pin-change interrupt banks, one vector each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PinChangeBank {
    /// PCINT0..7 on PORTB
    PortB = 0,
    /// PCINT8..14 on PORTC
    PortC = 1,
    /// PCINT16..23 on PORTD
    PortD = 2,
}

pub struct PinChange {
    exint: EXINT,
}

impl PinChange {
    /// All banks start disabled.
    pub fn new(exint: EXINT) -> Self {
        unsafe {
            exint.pcicr.write(|w| w.bits(0));
        }
        Self { exint }
    }

    /// Enable the bank vector and add `mask` (bit positions within the port) to its mask register.
    pub fn enable(&mut self, bank: PinChangeBank, mask: u8) {
        unsafe {
            match bank {
                PinChangeBank::PortB => self.exint.pcmsk0.modify(|r, w| w.bits(r.bits() | mask)),
                PinChangeBank::PortC => self.exint.pcmsk1.modify(|r, w| w.bits(r.bits() | mask)),
                PinChangeBank::PortD => self.exint.pcmsk2.modify(|r, w| w.bits(r.bits() | mask)),
            }
            // drop any change latched while configuring
            self.exint.pcifr.write(|w| w.bits(1 << bank as u8));
            self.exint
                .pcicr
                .modify(|r, w| w.bits(r.bits() | (1 << bank as u8)));
        }
    }
}
