use crate::interrupts::{InterruptFlags, IE_ADDR, IF_ADDR};
use crate::machine::ppu::mmio::DMA_ADDR;
use crate::machine::serial::{SB_ADDR, SC_ADDR};
use crate::machine::timer::io::{DIV_ADDR, TAC_ADDR};

use super::boot::BOOT_ROM_DISABLE_ADDR;
use super::GameBoyBus;

const JOYP_ADDR: u16 = 0xFF00;

impl GameBoyBus {
    pub(super) fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => {
                if let Some(byte) = self.boot_rom_read(addr) {
                    return byte;
                }
                self.cartridge_read(addr)
            }
            0x8000..=0x9FFF => self.ppu.read8(addr),
            0xA000..=0xBFFF => self.cartridge_read(addr),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            0xFE00..=0xFE9F => self.ppu.read8(addr),
            JOYP_ADDR => self.joypad.read8(),
            SB_ADDR | SC_ADDR => self.serial.read8(addr),
            DIV_ADDR..=TAC_ADDR => self.timer.read8(addr),
            IF_ADDR => self.if_reg.bits() | 0xE0,
            0xFF40..=0xFF4B => self.ppu.read8(addr),
            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize],
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            IE_ADDR => self.ie_reg,
            // Echo RAM and the prohibited area after OAM.
            _ => {
                log::trace!("read from unmapped address 0x{addr:04X}");
                0xFF
            }
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => match self.cartridge.as_mut() {
                Some(cart) => cart.write8(addr, value),
                None => log::trace!("write to 0x{addr:04X} with no cartridge"),
            },
            0x8000..=0x9FFF => self.ppu.write8(addr, value),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xFE00..=0xFE9F => self.ppu.write8(addr, value),
            JOYP_ADDR => self.joypad.write8(value),
            SB_ADDR | SC_ADDR => self.serial.write8(addr, value),
            DIV_ADDR..=TAC_ADDR => self.timer.write8(addr, value),
            IF_ADDR => self.if_reg = InterruptFlags::from_bits_truncate(value),
            DMA_ADDR => {
                self.ppu.write8(addr, value);
                self.oam_dma(value);
            }
            0xFF40..=0xFF4B => self.ppu.write8(addr, value),
            BOOT_ROM_DISABLE_ADDR => {
                self.io[(addr - 0xFF00) as usize] = value;
                self.disable_boot_rom();
            }
            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize] = value,
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            IE_ADDR => self.ie_reg = value,
            _ => log::trace!("write 0x{value:02X} to unmapped address 0x{addr:04X} dropped"),
        }
    }

    fn cartridge_read(&self, addr: u16) -> u8 {
        match &self.cartridge {
            Some(cart) => cart.read8(addr),
            None => 0xFF,
        }
    }
}
