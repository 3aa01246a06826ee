use crate::interrupts::InterruptFlags;

use super::{cartridge::Cartridge, joypad::Joypad, ppu::Ppu, serial::Serial, timer::Timer};

mod boot;
mod dma;
mod init;
mod mmio;
mod traits;

pub use boot::BOOT_ROM_SIZE;

const WRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;
const IO_SIZE: usize = 0x80;

/// The DMG address space.
///
/// Single owner of every peripheral; the CPU reaches them only through the
/// `Bus` trait (`read8` / `write8` / `tick`).
///
/// | Range         | Target                                        |
/// |---------------|-----------------------------------------------|
/// | 0000-00FF     | boot ROM while enabled, else cartridge        |
/// | 0000-7FFF     | cartridge ROM / MBC control                   |
/// | 8000-9FFF     | VRAM (PPU)                                    |
/// | A000-BFFF     | cartridge RAM                                 |
/// | C000-DFFF     | WRAM                                          |
/// | E000-FDFF     | unmapped                                      |
/// | FE00-FE9F     | OAM (PPU)                                     |
/// | FEA0-FEFF     | unmapped                                      |
/// | FF00-FF7F     | I/O registers                                 |
/// | FF80-FFFE     | HRAM                                          |
/// | FFFF          | IE                                            |
pub struct GameBoyBus {
    boot_rom: Option<Vec<u8>>,
    boot_rom_enabled: bool,
    cartridge: Option<Cartridge>,
    pub(crate) ppu: Ppu,
    pub(crate) timer: Timer,
    pub(crate) joypad: Joypad,
    pub(crate) serial: Serial,
    wram: Vec<u8>,
    hram: [u8; HRAM_SIZE],
    /// Backing store for I/O addresses without a dedicated peripheral.
    io: [u8; IO_SIZE],
    if_reg: InterruptFlags,
    ie_reg: u8,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        Self {
            boot_rom: None,
            boot_rom_enabled: false,
            cartridge: None,
            ppu: Ppu::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            serial: Serial::default(),
            wram: vec![0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            io: [0; IO_SIZE],
            if_reg: InterruptFlags::empty(),
            ie_reg: 0,
        }
    }
}

impl GameBoyBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub fn cartridge_mut(&mut self) -> Option<&mut Cartridge> {
        self.cartridge.as_mut()
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn joypad_mut(&mut self) -> &mut Joypad {
        &mut self.joypad
    }

    /// Bytes captured from the serial debug sideband.
    pub fn serial_output(&self) -> &[u8] {
        self.serial.output()
    }

    /// Current interrupt request lines (IF, low five bits).
    pub fn interrupt_flags(&self) -> InterruptFlags {
        self.if_reg
    }
}
