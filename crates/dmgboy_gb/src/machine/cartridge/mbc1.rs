use super::{RAM_BANK_SIZE, ROM_BANK_SIZE};

/// MBC1 banking registers.
///
/// The 5-bit register at 0x2000-0x3FFF selects the switchable ROM bank at
/// 0x4000-0x7FFF. The 2-bit register at 0x4000-0x5FFF is the RAM bank; in
/// advanced mode (0x6000-0x7FFF) it also supplies bits 5-6 of the bank
/// mapped at 0x0000-0x3FFF.
#[derive(Clone, Debug)]
pub(super) struct Mbc1 {
    ram_enable: bool,
    bank_low5: u8,
    bank_high2: u8,
    /// false: simple mode (0x0000-0x3FFF fixed to bank 0).
    /// true: advanced mode (the 2-bit register also banks 0x0000-0x3FFF).
    advanced: bool,
}

impl Default for Mbc1 {
    fn default() -> Self {
        Self {
            ram_enable: false,
            bank_low5: 1,
            bank_high2: 0,
            advanced: false,
        }
    }
}

impl Mbc1 {
    pub(super) fn write_control(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enable = value & 0x0F == 0x0A;
            }
            0x2000..=0x3FFF => {
                // Bank 0 cannot be mapped here; the register turns it into 1.
                self.bank_low5 = (value & 0x1F).max(1);
            }
            0x4000..=0x5FFF => {
                self.bank_high2 = value & 0x03;
            }
            0x6000..=0x7FFF => {
                self.advanced = value & 0x01 != 0;
            }
            _ => {}
        }
    }

    /// Offset into the ROM image for a CPU address in 0x0000-0x7FFF. Bank
    /// numbers wrap at the number of banks present.
    pub(super) fn rom_offset(&self, addr: u16, rom_banks: usize) -> usize {
        let bank = if addr < 0x4000 {
            if self.advanced {
                (self.bank_high2 as usize) << 5
            } else {
                0
            }
        } else {
            self.bank_low5 as usize
        };
        (bank % rom_banks) * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1))
    }

    pub(super) fn ram_offset(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable {
            return None;
        }
        Some(self.bank_high2 as usize * RAM_BANK_SIZE + (addr as usize - 0xA000))
    }
}
