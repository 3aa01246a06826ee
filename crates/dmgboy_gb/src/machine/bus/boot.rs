use super::GameBoyBus;

/// The DMG boot ROM is exactly 256 bytes and overlays 0x0000-0x00FF.
pub const BOOT_ROM_SIZE: usize = 0x100;

/// Any write here unmaps the boot ROM until power-off.
pub(super) const BOOT_ROM_DISABLE_ADDR: u16 = 0xFF50;

impl GameBoyBus {
    /// Install a boot ROM image and enable the overlay. The caller checks the
    /// size.
    pub(crate) fn install_boot_rom(&mut self, image: Vec<u8>) {
        debug_assert_eq!(image.len(), BOOT_ROM_SIZE);
        self.boot_rom = Some(image);
        self.boot_rom_enabled = true;
    }

    pub fn boot_rom_enabled(&self) -> bool {
        self.boot_rom_enabled
    }

    /// Overlay byte for `addr`, if the boot ROM currently answers it.
    pub(super) fn boot_rom_read(&self, addr: u16) -> Option<u8> {
        if !self.boot_rom_enabled || addr as usize >= BOOT_ROM_SIZE {
            return None;
        }
        self.boot_rom
            .as_ref()
            .and_then(|rom| rom.get(addr as usize).copied())
    }

    pub(super) fn disable_boot_rom(&mut self) {
        if self.boot_rom_enabled {
            log::info!("boot ROM unmapped");
        }
        self.boot_rom_enabled = false;
    }
}
