use super::{Bus, Cpu};

impl Cpu {
    /// `CB 00..=3F`: RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL r.
    pub(super) fn cb_shift(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z);
        let result = self.alu_shift(cb >> 3, value);
        self.write_reg8(bus, z, result);

        if z == 6 {
            16
        } else {
            8
        }
    }

    /// `CB 40..=7F`: BIT b,r. Preserves C, sets H, clears N.
    pub(super) fn cb_bit(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        let z = cb & 0x07;
        let bit = (cb >> 3) & 0x07;
        let value = self.read_reg8(bus, z);

        self.regs.f.z = value & (1 << bit) == 0;
        self.regs.f.n = false;
        self.regs.f.h = true;

        if z == 6 {
            12
        } else {
            8
        }
    }

    /// `CB 80..=BF`: RES b,r.
    pub(super) fn cb_res(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        let z = cb & 0x07;
        let bit = (cb >> 3) & 0x07;
        let value = self.read_reg8(bus, z) & !(1 << bit);
        self.write_reg8(bus, z, value);

        if z == 6 {
            16
        } else {
            8
        }
    }

    /// `CB C0..=FF`: SET b,r.
    pub(super) fn cb_set(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        let z = cb & 0x07;
        let bit = (cb >> 3) & 0x07;
        let value = self.read_reg8(bus, z) | (1 << bit);
        self.write_reg8(bus, z, value);

        if z == 6 {
            16
        } else {
            8
        }
    }
}
