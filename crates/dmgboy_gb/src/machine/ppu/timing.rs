use crate::interrupts::InterruptFlags;

use super::{Ppu, PpuMode, StatSelect};

/// Last visible scanline + 1; LY at VBlank entry.
const VBLANK_START_LINE: u8 = 144;
/// Last scanline of the frame.
const LAST_LINE: u8 = 153;

impl Ppu {
    /// Advance the sequencer by `cycles` dots.
    ///
    /// A single call may cross several mode boundaries. Returns the
    /// interrupt lines raised along the way (VBlank on entry to line 144,
    /// STAT on each rising edge of the combined STAT line). Nothing
    /// advances while the LCD is off.
    pub fn tick(&mut self, cycles: u32) -> InterruptFlags {
        let mut raised = InterruptFlags::empty();
        if !self.lcd_enabled() {
            return raised;
        }

        self.dots += cycles;
        while self.dots >= self.mode.duration() {
            self.dots -= self.mode.duration();
            raised |= self.next_mode();
            if self.update_stat_line() {
                raised |= InterruptFlags::STAT;
            }
        }
        raised
    }

    /// The mode transition function.
    fn next_mode(&mut self) -> InterruptFlags {
        match self.mode {
            PpuMode::OamSearch => {
                self.mode = PpuMode::PixelTransfer;
                self.render_scanline();
                InterruptFlags::empty()
            }
            PpuMode::PixelTransfer => {
                self.mode = PpuMode::HBlank;
                InterruptFlags::empty()
            }
            PpuMode::HBlank => {
                self.ly += 1;
                if self.ly == VBLANK_START_LINE {
                    self.mode = PpuMode::VBlank;
                    self.frame_ready = true;
                    log::debug!("VBlank entry");
                    InterruptFlags::VBLANK
                } else {
                    self.mode = PpuMode::OamSearch;
                    self.search_sprites();
                    InterruptFlags::empty()
                }
            }
            PpuMode::VBlank => {
                if self.ly == LAST_LINE {
                    self.ly = 0;
                    self.mode = PpuMode::OamSearch;
                    self.search_sprites();
                } else {
                    self.ly += 1;
                }
                InterruptFlags::empty()
            }
        }
    }

    /// Combined STAT line: OR of the enabled mode sources and LY==LYC.
    fn stat_line_level(&self) -> bool {
        let select = self.stat_select;
        (select.contains(StatSelect::HBLANK) && self.mode == PpuMode::HBlank)
            || (select.contains(StatSelect::VBLANK) && self.mode == PpuMode::VBlank)
            || (select.contains(StatSelect::OAM) && self.mode == PpuMode::OamSearch)
            || (select.contains(StatSelect::LYC_MATCH) && self.ly == self.lyc)
    }

    /// Latch the current STAT line; true on a 0 -> 1 edge.
    fn update_stat_line(&mut self) -> bool {
        let previous = self.stat_line;
        self.stat_line = self.stat_line_level();
        let rising = !previous && self.stat_line;
        if rising {
            log::debug!(
                "STAT rising edge (LY={} LYC={} mode={:?})",
                self.ly,
                self.lyc,
                self.mode
            );
        }
        rising
    }
}
