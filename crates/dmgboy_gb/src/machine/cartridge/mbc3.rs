use super::{RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC3 banking registers.
///
/// The real-time clock is not emulated: selecting an RTC register
/// (0x08-0x0C) through 0x4000-0x5FFF maps nothing, so 0xA000-0xBFFF reads
/// 0xFF, and the 0x6000-0x7FFF latch is ignored.
#[derive(Clone, Debug)]
pub(super) struct Mbc3 {
    ram_enable: bool,
    rom_bank: u8,
    ram_select: u8,
}

impl Default for Mbc3 {
    fn default() -> Self {
        Self {
            ram_enable: false,
            rom_bank: 1,
            ram_select: 0,
        }
    }
}

impl Mbc3 {
    pub(super) fn write_control(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enable = value & 0x0F == 0x0A;
            }
            0x2000..=0x3FFF => {
                // 7-bit ROM bank number; 0 is remapped to 1.
                self.rom_bank = (value & 0x7F).max(1);
            }
            0x4000..=0x5FFF => {
                self.ram_select = value;
            }
            _ => {}
        }
    }

    pub(super) fn rom_offset(&self, addr: u16, rom_banks: usize) -> usize {
        let bank = if addr < 0x4000 {
            0
        } else {
            self.rom_bank as usize
        };
        (bank % rom_banks) * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1))
    }

    pub(super) fn ram_offset(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram_select > 0x07 {
            return None;
        }
        Some(self.ram_select as usize * RAM_BANK_SIZE + (addr as usize - 0xA000))
    }
}
