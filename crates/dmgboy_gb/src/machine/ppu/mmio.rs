use super::{LcdControl, Ppu, PpuMode, StatSelect, OAM_SIZE, VRAM_SIZE};

pub(crate) const LCDC_ADDR: u16 = 0xFF40;
pub(crate) const STAT_ADDR: u16 = 0xFF41;
pub(crate) const SCY_ADDR: u16 = 0xFF42;
pub(crate) const SCX_ADDR: u16 = 0xFF43;
pub(crate) const LY_ADDR: u16 = 0xFF44;
pub(crate) const LYC_ADDR: u16 = 0xFF45;
pub(crate) const DMA_ADDR: u16 = 0xFF46;
pub(crate) const BGP_ADDR: u16 = 0xFF47;
pub(crate) const OBP0_ADDR: u16 = 0xFF48;
pub(crate) const OBP1_ADDR: u16 = 0xFF49;
pub(crate) const WY_ADDR: u16 = 0xFF4A;
pub(crate) const WX_ADDR: u16 = 0xFF4B;

impl Ppu {
    /// Read VRAM (0x8000-0x9FFF), OAM (0xFE00-0xFE9F) or an LCD register.
    pub fn read8(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize % VRAM_SIZE],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize % OAM_SIZE],
            LCDC_ADDR => self.lcdc.bits(),
            STAT_ADDR => self.read_stat(),
            SCY_ADDR => self.scy,
            SCX_ADDR => self.scx,
            LY_ADDR => self.ly,
            LYC_ADDR => self.lyc,
            DMA_ADDR => self.dma,
            BGP_ADDR => self.bgp,
            OBP0_ADDR => self.obp0,
            OBP1_ADDR => self.obp1,
            WY_ADDR => self.wy,
            WX_ADDR => self.wx,
            _ => 0xFF,
        }
    }

    pub fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize % VRAM_SIZE] = value,
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize % OAM_SIZE] = value,
            LCDC_ADDR => self.write_lcdc(value),
            // Mode and coincidence bits are read-only.
            STAT_ADDR => self.stat_select = StatSelect::from_bits_truncate(value),
            SCY_ADDR => self.scy = value,
            SCX_ADDR => self.scx = value,
            // LY is read-only.
            LY_ADDR => {}
            LYC_ADDR => self.lyc = value,
            DMA_ADDR => self.dma = value,
            BGP_ADDR => self.bgp = value,
            OBP0_ADDR => self.obp0 = value,
            OBP1_ADDR => self.obp1 = value,
            WY_ADDR => self.wy = value,
            WX_ADDR => self.wx = value,
            _ => {}
        }
    }

    /// Store one OAM byte by table offset; used by OAM DMA.
    pub(crate) fn write_oam(&mut self, index: usize, value: u8) {
        if let Some(slot) = self.oam.get_mut(index) {
            *slot = value;
        }
    }

    /// STAT: bit 7 reads 1, bits 3-6 are the selects, bit 2 is LY==LYC and
    /// bits 0-1 the mode (0 while the LCD is off).
    fn read_stat(&self) -> u8 {
        let mode = if self.lcd_enabled() {
            self.mode.bits()
        } else {
            PpuMode::HBlank.bits()
        };
        let coincidence = if self.ly == self.lyc { 0x04 } else { 0x00 };
        0x80 | self.stat_select.bits() | coincidence | mode
    }

    fn write_lcdc(&mut self, value: u8) {
        let was_enabled = self.lcd_enabled();
        self.lcdc = LcdControl::from_bits_retain(value);
        let now_enabled = self.lcd_enabled();

        if was_enabled && !now_enabled {
            log::debug!("LCD disabled at LY={} mode={:?}", self.ly, self.mode);
            self.restart_sequencer();
        } else if !was_enabled && now_enabled {
            log::debug!("LCD enabled (LCDC=0x{value:02X})");
            self.restart_sequencer();
            self.search_sprites();
        }
    }

    /// Back to the top of the frame: LY 0, OAM search, no dots accumulated.
    fn restart_sequencer(&mut self) {
        self.ly = 0;
        self.mode = PpuMode::OamSearch;
        self.dots = 0;
        self.stat_line = false;
    }
}
