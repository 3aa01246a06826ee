use bitflags::bitflags;

bitflags! {
    /// LCDC (FF40).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct LcdControl: u8 {
        const LCD_ENABLE        = 0b1000_0000;
        const WINDOW_TILE_MAP   = 0b0100_0000;
        const WINDOW_ENABLE     = 0b0010_0000;
        const TILE_DATA_UNSIGNED = 0b0001_0000;
        const BG_TILE_MAP       = 0b0000_1000;
        const OBJ_TALL          = 0b0000_0100;
        const OBJ_ENABLE        = 0b0000_0010;
        const BG_WINDOW_ENABLE  = 0b0000_0001;
    }
}

bitflags! {
    /// Writable STAT (FF41) interrupt source selects.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct StatSelect: u8 {
        const LYC_MATCH = 0b0100_0000;
        const OAM       = 0b0010_0000;
        const VBLANK    = 0b0001_0000;
        const HBLANK    = 0b0000_1000;
    }
}

impl LcdControl {
    pub(super) fn bg_map_base(self) -> u16 {
        if self.contains(Self::BG_TILE_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    pub(super) fn window_map_base(self) -> u16 {
        if self.contains(Self::WINDOW_TILE_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    pub(super) fn sprite_height(self) -> u8 {
        if self.contains(Self::OBJ_TALL) {
            16
        } else {
            8
        }
    }
}

/// PPU mode as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PpuMode {
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    PixelTransfer = 3,
}

impl PpuMode {
    /// Dots spent in this mode before the next transition.
    pub const fn duration(self) -> u32 {
        match self {
            PpuMode::OamSearch => 80,
            PpuMode::PixelTransfer => 172,
            PpuMode::HBlank => 204,
            PpuMode::VBlank => 456,
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }
}
