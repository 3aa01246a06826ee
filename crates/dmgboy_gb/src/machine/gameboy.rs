use anyhow::{bail, Result};
use dmgboy_common::key::Key;

use crate::cpu::{Bus, Cpu};

use super::{bus::BOOT_ROM_SIZE, Button, Cartridge, GameBoyBus};

/// T-cycles in one 154-line LCD frame.
pub const CYCLES_PER_FRAME: u32 = 70_224;

/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus. This is the main entry point used by the
/// `GameBoyApp` wrapper and the headless runner.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    /// A machine in the state the boot ROM leaves behind at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Cpu::new();
        cpu.apply_post_boot_state();
        let mut bus = GameBoyBus::new();
        bus.apply_post_boot_state();
        Self { cpu, bus }
    }

    /// Map a 256-byte boot ROM over 0x0000 and restart from the reset vector.
    ///
    /// Nothing changes when the image has the wrong size.
    pub fn load_boot_rom(&mut self, image: &[u8]) -> Result<()> {
        if image.len() != BOOT_ROM_SIZE {
            bail!(
                "boot ROM must be exactly {BOOT_ROM_SIZE} bytes, got {}",
                image.len()
            );
        }
        self.bus.install_boot_rom(image.to_vec());
        self.bus.apply_power_on_lcd();
        self.cpu.reset();
        log::info!("boot ROM installed, starting at 0x0000");
        Ok(())
    }

    /// Parse a cartridge image and insert it.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        let cartridge = Cartridge::load(rom)?;
        self.bus.insert_cartridge(cartridge);
        Ok(())
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.bus.cartridge()
    }

    /// Execute one CPU step and feed its cycles to the peripherals.
    ///
    /// Returns 0 once the CPU has locked up; nothing is ticked in that case.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        if cycles > 0 {
            self.bus.tick(cycles);
        }
        cycles
    }

    /// Run until the PPU presents a frame, or for one frame's worth of cycles
    /// while the LCD is off.
    ///
    /// Returns `false` when the CPU stopped on an unimplemented opcode.
    pub fn step_frame(&mut self) -> bool {
        let mut elapsed = 0u32;
        while elapsed < CYCLES_PER_FRAME {
            let cycles = self.step();
            if cycles == 0 {
                return false;
            }
            elapsed += cycles;
            if self.bus.ppu.take_frame_ready() {
                break;
            }
        }
        true
    }

    /// Update joypad state from a host key event.
    ///
    /// - Z => A, X => B
    /// - A => Select, S => Start
    /// - Arrow keys => D-pad
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        let button = match key {
            Key::Right => Button::Right,
            Key::Left => Button::Left,
            Key::Up => Button::Up,
            Key::Down => Button::Down,
            Key::Z => Button::A,
            Key::X => Button::B,
            Key::A => Button::Select,
            Key::S => Button::Start,
            Key::Return | Key::Escape => return,
        };
        self.bus.joypad_mut().set_button(button, pressed);
    }

    /// RGBA8888 framebuffer of the last rendered lines.
    pub fn framebuffer(&self) -> &[u8] {
        self.bus.ppu().framebuffer()
    }

    /// External RAM of a battery-backed cartridge.
    pub fn save_data(&self) -> Option<&[u8]> {
        self.bus
            .cartridge()
            .filter(|cart| cart.battery())
            .map(Cartridge::ram)
    }

    /// Restore external RAM from a save blob.
    pub fn load_save_data(&mut self, data: &[u8]) -> Result<()> {
        match self.bus.cartridge_mut() {
            Some(cart) => cart.load_ram(data),
            None => bail!("no cartridge inserted"),
        }
    }

    /// Bytes the program pushed out through the serial port.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    pub fn is_locked(&self) -> bool {
        self.cpu.is_locked()
    }

    pub fn bus(&self) -> &GameBoyBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut GameBoyBus {
        &mut self.bus
    }
}
