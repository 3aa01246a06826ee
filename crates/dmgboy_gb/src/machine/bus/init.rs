use crate::machine::ppu::mmio::{BGP_ADDR, LCDC_ADDR};

use super::GameBoyBus;

impl GameBoyBus {
    /// I/O state left behind by the DMG boot ROM when it jumps to 0x0100.
    ///
    /// Used when the machine starts without a boot ROM image.
    pub(crate) fn apply_post_boot_state(&mut self) {
        self.boot_rom_enabled = false;
        self.joypad.write8(0xCF);
        self.write(BGP_ADDR, 0xFC);
        self.write(LCDC_ADDR, 0x91);
    }

    /// LCD back to its power-on state (off), as the boot ROM expects.
    pub(crate) fn apply_power_on_lcd(&mut self) {
        self.write(LCDC_ADDR, 0x00);
    }
}
