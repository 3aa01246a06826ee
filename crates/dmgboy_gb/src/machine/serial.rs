/// Serial port stand-in (SB/SC).
///
/// No link cable is emulated. Test ROMs print diagnostics by writing a byte
/// to SB and then 0x81 (start + internal clock) to SC; that pattern is
/// captured into `output` as a debug sideband and the start bit is cleared
/// as if the transfer completed instantly.
#[derive(Clone, Debug, Default)]
pub(crate) struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
}

pub(crate) const SB_ADDR: u16 = 0xFF01;
pub(crate) const SC_ADDR: u16 = 0xFF02;

impl Serial {
    pub(crate) fn read8(&self, addr: u16) -> u8 {
        match addr {
            SB_ADDR => self.sb,
            // Unused SC bits read as 1.
            SC_ADDR => self.sc | 0x7E,
            _ => 0xFF,
        }
    }

    pub(crate) fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            SB_ADDR => self.sb = value,
            SC_ADDR => {
                self.sc = value;
                if self.sc & 0x81 == 0x81 {
                    log::debug!(
                        "serial: 0x{:02X} {:?}",
                        self.sb,
                        char::from(self.sb)
                    );
                    self.output.push(self.sb);
                    self.sc &= !0x80;
                }
            }
            _ => {}
        }
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }
}
