use crate::cpu::Bus;
use crate::interrupts::InterruptFlags;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value)
    }

    /// Advance timer, PPU and joypad by one CPU step's worth of cycles and
    /// merge every interrupt they raise into IF.
    fn tick(&mut self, cycles: u32) {
        let mut raised = InterruptFlags::empty();
        if self.timer.tick(cycles) {
            raised |= InterruptFlags::TIMER;
        }
        raised |= self.ppu.tick(cycles);
        if self.joypad.tick() {
            raised |= InterruptFlags::JOYPAD;
        }
        self.if_reg |= raised;
    }
}
