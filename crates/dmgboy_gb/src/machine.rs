mod bus;
pub mod cartridge;
mod gameboy;
pub mod joypad;
pub mod ppu;
mod serial;
pub mod timer;

pub use bus::{GameBoyBus, BOOT_ROM_SIZE};
pub use cartridge::{Cartridge, CartridgeHeader, MbcKind};
pub use gameboy::{GameBoy, CYCLES_PER_FRAME};
pub use joypad::{Button, Joypad};
pub use ppu::{Ppu, PpuMode};
pub use timer::Timer;

#[cfg(test)]
mod tests;
