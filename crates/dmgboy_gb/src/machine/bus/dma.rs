use super::GameBoyBus;

/// Bytes copied by one OAM DMA transfer.
const OAM_DMA_LEN: u16 = 0xA0;

impl GameBoyBus {
    /// OAM DMA: copy 160 bytes from `value << 8` into OAM.
    ///
    /// The transfer completes immediately; its 160 M-cycle duration and the
    /// CPU bus conflicts during it are not modelled.
    pub(super) fn oam_dma(&mut self, value: u8) {
        let base = (value as u16) << 8;
        for i in 0..OAM_DMA_LEN {
            let byte = self.read(base.wrapping_add(i));
            self.ppu.write_oam(i as usize, byte);
        }
    }
}
