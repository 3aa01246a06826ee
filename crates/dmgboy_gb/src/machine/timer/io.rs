use super::Timer;

pub(crate) const DIV_ADDR: u16 = 0xFF04;
pub(crate) const TIMA_ADDR: u16 = 0xFF05;
pub(crate) const TMA_ADDR: u16 = 0xFF06;
pub(crate) const TAC_ADDR: u16 = 0xFF07;

impl Timer {
    pub fn read8(&self, addr: u16) -> u8 {
        match addr {
            DIV_ADDR => self.div,
            TIMA_ADDR => self.tima,
            TMA_ADDR => self.tma,
            TAC_ADDR => self.tac,
            _ => 0xFF,
        }
    }

    /// Register write. Any write to DIV clears it together with its
    /// sub-256 cycle accumulator, regardless of the value written.
    pub fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            DIV_ADDR => {
                self.div = 0;
                self.div_cycles = 0;
            }
            TIMA_ADDR => self.tima = value,
            TMA_ADDR => self.tma = value,
            TAC_ADDR => self.tac = value,
            _ => {}
        }
    }
}
