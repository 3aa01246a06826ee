use anyhow::{bail, Result};

use super::MbcKind;

const TITLE_START: usize = 0x134;
const TITLE_END: usize = 0x144;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;
/// First byte after the header; shorter images are rejected.
pub(crate) const HEADER_END: usize = 0x150;

/// 8 MiB; larger codes are not defined.
const MAX_ROM_SIZE_CODE: u8 = 8;

/// Declared external RAM size in KiB for RAM-size codes 0-6.
const RAM_SIZE_KIB: [usize; 7] = [0, 0, 8, 32, 64, 128, 64];

/// The header fields the emulator cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    title: String,
    cartridge_type: u8,
    kind: MbcKind,
    rom_size: usize,
    ram_size: usize,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            bail!(
                "cartridge image is {} bytes, too short for a header (need {})",
                rom.len(),
                HEADER_END
            );
        }

        let title = rom[TITLE_START..TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect();

        let cartridge_type = rom[CARTRIDGE_TYPE];
        let kind = match cartridge_type {
            0x00 => MbcKind::RomOnly,
            0x01..=0x03 => MbcKind::Mbc1,
            0x0F..=0x13 => MbcKind::Mbc3,
            other => {
                log::warn!("unsupported cartridge type 0x{other:02X}, mapping as ROM only");
                MbcKind::RomOnly
            }
        };

        let rom_code = rom[ROM_SIZE];
        let rom_size = if rom_code <= MAX_ROM_SIZE_CODE {
            (32 * 1024) << rom_code
        } else {
            log::warn!("unknown ROM size code 0x{rom_code:02X}");
            0
        };

        let ram_code = rom[RAM_SIZE];
        let ram_size = match RAM_SIZE_KIB.get(ram_code as usize) {
            Some(kib) => kib * 1024,
            None => {
                log::warn!("unknown RAM size code 0x{ram_code:02X}, assuming no RAM");
                0
            }
        };

        Ok(Self {
            title,
            cartridge_type,
            kind,
            rom_size,
            ram_size,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw header byte 0x147.
    pub fn cartridge_type(&self) -> u8 {
        self.cartridge_type
    }

    /// Declared ROM size in bytes: 32 KiB << code.
    pub fn rom_size(&self) -> usize {
        self.rom_size
    }

    /// Declared external RAM size in bytes.
    pub fn ram_size(&self) -> usize {
        self.ram_size
    }

    /// Controller family. Unknown type bytes map to `RomOnly`.
    pub fn kind(&self) -> MbcKind {
        self.kind
    }

    pub fn has_battery(&self) -> bool {
        matches!(self.cartridge_type, 0x03 | 0x0F | 0x10 | 0x13)
    }
}
