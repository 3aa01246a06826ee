//! LCD controller.
//!
//! Owns VRAM, OAM and the LCD registers, sequences the four per-line modes
//! from accumulated dot cycles and paints one scanline of RGBA pixels on
//! each entry into pixel transfer.

pub(crate) mod mmio;
mod regs;
mod render;
mod timing;

pub use regs::{LcdControl, PpuMode, StatSelect};

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub(crate) const VRAM_SIZE: usize = 0x2000;
pub(crate) const OAM_SIZE: usize = 0xA0;
/// Bytes in one RGBA frame.
pub const FRAMEBUFFER_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

/// Sprites selectable on one scanline.
const MAX_SPRITES_PER_LINE: usize = 10;

/// One OAM entry as stored in the sprite table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sprite {
    /// Screen Y + 16.
    pub y: u8,
    /// Screen X + 8.
    pub x: u8,
    pub tile: u8,
    pub attrs: u8,
}

#[derive(Clone, Debug)]
pub struct Ppu {
    vram: Vec<u8>,
    oam: [u8; OAM_SIZE],

    lcdc: LcdControl,
    /// STAT bits 3-6; the mode and coincidence bits are derived on read.
    stat_select: StatSelect,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    /// Last value written to the DMA register.
    dma: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    mode: PpuMode,
    /// Dots accumulated inside the current mode.
    dots: u32,
    /// Latched STAT interrupt line; an interrupt is requested only on its
    /// rising edge.
    stat_line: bool,
    /// Sprites found by the last OAM search, in table order.
    line_sprites: Vec<Sprite>,

    framebuffer: Vec<u8>,
    frame_ready: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// Power-on state: LCD off, all video memory cleared, white screen.
    pub fn new() -> Self {
        Self {
            vram: vec![0; VRAM_SIZE],
            oam: [0; OAM_SIZE],
            lcdc: LcdControl::empty(),
            stat_select: StatSelect::empty(),
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            dma: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            mode: PpuMode::OamSearch,
            dots: 0,
            stat_line: false,
            line_sprites: Vec::with_capacity(MAX_SPRITES_PER_LINE),
            framebuffer: vec![0xFF; FRAMEBUFFER_LEN],
            frame_ready: false,
        }
    }

    /// RGBA8888 pixels, row-major, `SCREEN_WIDTH * SCREEN_HEIGHT * 4` bytes.
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    pub fn mode(&self) -> PpuMode {
        self.mode
    }

    pub fn ly(&self) -> u8 {
        self.ly
    }

    pub fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(LcdControl::LCD_ENABLE)
    }

    /// Sprites selected for the current scanline.
    pub fn line_sprites(&self) -> &[Sprite] {
        &self.line_sprites
    }

    /// Report and clear the "frame completed" flag set on VBlank entry.
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }
}
