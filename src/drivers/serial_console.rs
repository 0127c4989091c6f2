use embedded_hal::serial::Write;

/// Line-oriented debug output over a blocking serial writer.
pub struct SerialConsole<W> {
    tx: W,
}

impl<W: Write<u8>> SerialConsole<W> {
    pub fn new(tx: W) -> Self {
        Self { tx }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), W::Error> {
        nb::block!(self.tx.write(byte))
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), W::Error> {
        for byte in s.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    pub fn write_line(&mut self, s: &str) -> Result<(), W::Error> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    pub fn write_hex(&mut self, val: u8) -> Result<(), W::Error> {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        self.write_byte(HEX_CHARS[(val >> 4) as usize])?;
        self.write_byte(HEX_CHARS[(val & 0xF) as usize])
    }

    /// `[DBG] msg: 0xNN`
    pub fn debug(&mut self, msg: &str, val: u8) -> Result<(), W::Error> {
        self.write_str("[DBG] ")?;
        self.write_str(msg)?;
        self.write_str(": 0x")?;
        self.write_hex(val)?;
        self.write_str("\r\n")
    }

    pub fn flush(&mut self) -> Result<(), W::Error> {
        nb::block!(self.tx.flush())
    }

    pub fn release(self) -> W {
        self.tx
    }
}

impl<W: Write<u8>> ufmt::uWrite for SerialConsole<W> {
    type Error = W::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        SerialConsole::write_str(self, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::serial::{Mock as SerialMock, Transaction};

    #[test]
    fn line_gets_crlf() {
        let serial = SerialMock::new(&[Transaction::write_many(b"Ready\r\n")]);
        let mut console = SerialConsole::new(serial);
        console.write_line("Ready").unwrap();
        console.release().done();
    }

    #[test]
    fn debug_prints_hex() {
        let serial = SerialMock::new(&[Transaction::write_many(b"[DBG] Steps: 0x32\r\n")]);
        let mut console = SerialConsole::new(serial);
        console.debug("Steps", 50).unwrap();
        console.release().done();
    }

    #[test]
    fn rotate_report_formats_step_count() {
        let serial = SerialMock::new(&[
            Transaction::write_many(b"[DBG] Rotate: 50 steps\r\n"),
            Transaction::flush(),
        ]);
        let mut console = SerialConsole::new(serial);
        ufmt::uwrite!(&mut console, "[DBG] Rotate: {} steps\r\n", 50u16).unwrap();
        console.flush().unwrap();
        console.release().done();
    }
}
