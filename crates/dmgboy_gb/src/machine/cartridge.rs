use anyhow::{bail, Result};

mod header;
mod mbc1;
mod mbc3;

pub use header::CartridgeHeader;
use mbc1::Mbc1;
use mbc3::Mbc3;

/// Size of one switchable ROM bank.
pub(crate) const ROM_BANK_SIZE: usize = 0x4000;
/// Size of one switchable external RAM bank.
pub(crate) const RAM_BANK_SIZE: usize = 0x2000;

/// Memory bank controller family selected by header byte 0x147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MbcKind {
    RomOnly,
    Mbc1,
    Mbc3,
}

/// Banking register state of the active controller.
#[derive(Clone, Debug)]
enum Mapper {
    RomOnly,
    Mbc1(Mbc1),
    Mbc3(Mbc3),
}

/// A loaded cartridge: full ROM image, external RAM and the controller that
/// maps them into 0x0000-0x7FFF and 0xA000-0xBFFF.
#[derive(Clone, Debug)]
pub struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Mapper,
}

impl Cartridge {
    /// Parse the header and take a copy of the image.
    ///
    /// Fails only when the image is too short to contain a header. An
    /// unknown controller type falls back to no banking.
    pub fn load(rom: &[u8]) -> Result<Self> {
        let header = CartridgeHeader::parse(rom)?;

        let mapper = match header.kind() {
            MbcKind::RomOnly => Mapper::RomOnly,
            MbcKind::Mbc1 => Mapper::Mbc1(Mbc1::default()),
            MbcKind::Mbc3 => Mapper::Mbc3(Mbc3::default()),
        };
        let ram_len = match mapper {
            Mapper::RomOnly => 0,
            _ => header.ram_size(),
        };

        if rom.len() != header.rom_size() {
            log::warn!(
                "cartridge image is {} bytes but the header declares {}",
                rom.len(),
                header.rom_size()
            );
        }

        log::info!(
            "cartridge loaded: \"{}\" type=0x{:02X} ({:?}) rom={}KiB ram={}KiB battery={}",
            header.title(),
            header.cartridge_type(),
            header.kind(),
            rom.len() / 1024,
            ram_len / 1024,
            header.has_battery()
        );

        Ok(Self {
            header,
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_len],
            mapper,
        })
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn kind(&self) -> MbcKind {
        match self.mapper {
            Mapper::RomOnly => MbcKind::RomOnly,
            Mapper::Mbc1(_) => MbcKind::Mbc1,
            Mapper::Mbc3(_) => MbcKind::Mbc3,
        }
    }

    /// Whether external RAM survives power-off and is eligible for save
    /// transfer.
    pub fn battery(&self) -> bool {
        self.header.has_battery()
    }

    /// Number of 16 KiB banks actually present in the image.
    fn rom_banks(&self) -> usize {
        (self.rom.len() / ROM_BANK_SIZE).max(1)
    }

    pub fn read8(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => {
                let index = match &self.mapper {
                    Mapper::RomOnly => addr as usize,
                    Mapper::Mbc1(m) => m.rom_offset(addr, self.rom_banks()),
                    Mapper::Mbc3(m) => m.rom_offset(addr, self.rom_banks()),
                };
                self.rom.get(index).copied().unwrap_or(0xFF)
            }
            0xA000..=0xBFFF => match self.ram_index(addr) {
                Some(index) => self.ram[index],
                None => 0xFF,
            },
            _ => 0xFF,
        }
    }

    pub fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => match &mut self.mapper {
                Mapper::RomOnly => {}
                Mapper::Mbc1(m) => m.write_control(addr, value),
                Mapper::Mbc3(m) => m.write_control(addr, value),
            },
            0xA000..=0xBFFF => {
                if let Some(index) = self.ram_index(addr) {
                    self.ram[index] = value;
                }
            }
            _ => {}
        }
    }

    /// Resolve an external RAM address to a buffer index, or `None` when RAM
    /// is absent, disabled or not selected.
    fn ram_index(&self, addr: u16) -> Option<usize> {
        if self.ram.is_empty() {
            return None;
        }
        let offset = match &self.mapper {
            Mapper::RomOnly => return None,
            Mapper::Mbc1(m) => m.ram_offset(addr)?,
            Mapper::Mbc3(m) => m.ram_offset(addr)?,
        };
        Some(offset % self.ram.len())
    }

    /// Entire external RAM buffer, in save-file layout.
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Replace external RAM with a save-file blob.
    ///
    /// The cartridge is left untouched unless it is battery backed and the
    /// blob length equals the declared RAM size.
    pub fn load_ram(&mut self, data: &[u8]) -> Result<()> {
        if !self.battery() {
            bail!(
                "cartridge type 0x{:02X} has no battery-backed RAM",
                self.header.cartridge_type()
            );
        }
        if data.len() != self.ram.len() {
            bail!(
                "save data is {} bytes, cartridge RAM is {} bytes",
                data.len(),
                self.ram.len()
            );
        }
        self.ram.copy_from_slice(data);
        log::info!("restored {} bytes of cartridge RAM", data.len());
        Ok(())
    }
}
