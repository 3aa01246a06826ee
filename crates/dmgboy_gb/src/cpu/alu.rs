use super::{Cpu, Flags};

impl Cpu {
    /// 8-bit ADD/ADC on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.regs.f.c);

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.a = result;
        self.regs.f = Flags {
            z: result == 0,
            n: false,
            h: half > 0x0F,
            c: full > 0xFF,
        };
    }

    /// 8-bit SUB/SBC on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry);
        self.regs.a = result;
    }

    /// Compare A with `value`: flags as for `A - value`, A untouched.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = i16::from(use_carry && self.regs.f.c);

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.regs.f = Flags {
            z: result == 0,
            n: true,
            h: half < 0,
            c: full < 0,
        };
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.regs.f = Flags {
            z: result == 0,
            n: false,
            h: true,
            c: false,
        };
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.regs.f = Flags {
            z: result == 0,
            ..Flags::default()
        };
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.regs.f = Flags {
            z: result == 0,
            ..Flags::default()
        };
    }

    /// Dispatch one of the eight accumulator operations by the 3-bit
    /// selector shared by the `0x80..=0xBF` block and the immediate forms.
    pub(super) fn alu_op(&mut self, op: u8, value: u8) {
        match op & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to compute a correction. Updates A, Z, H, C;
    /// N is unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.regs.f.c { 0x60 } else { 0x00 };
        if self.regs.f.h {
            adjust |= 0x06;
        }

        if !self.regs.f.n {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.regs.f.c = adjust >= 0x60;
        self.regs.f.h = false;
        self.regs.f.z = a == 0;
        self.regs.a = a;
    }

    /// INC r / INC (HL). C is preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.f.z = result == 0;
        self.regs.f.n = false;
        self.regs.f.h = (value & 0x0F) == 0x0F;
        result
    }

    /// DEC r / DEC (HL). C is preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.f.z = result == 0;
        self.regs.f.n = true;
        self.regs.f.h = (value & 0x0F) == 0;
        result
    }

    /// `ADD HL,rr`: Z preserved, N cleared, H from bit 11, C from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.regs.f.n = false;
        self.regs.f.h = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        self.regs.f.c = hl as u32 + value as u32 > 0xFFFF;

        self.regs.set_hl(result);
    }

    /// Signed 8-bit offset added to a 16-bit base, as used by `ADD SP,r8`
    /// and `LD HL,SP+r8`. Z and N cleared; H and C come from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.regs.f = Flags {
            z: false,
            n: false,
            h: (base & 0x000F) + (offset & 0x000F) > 0x000F,
            c: (base & 0x00FF) + (offset & 0x00FF) > 0x00FF,
        };
        base.wrapping_add(offset)
    }

    /// Rotate/shift/swap group selected by bits 5-3 of a CB opcode.
    ///
    /// All four flags are recomputed: Z from the result, N and H cleared,
    /// C from the bit shifted out (cleared for SWAP).
    pub(super) fn alu_shift(&mut self, op: u8, value: u8) -> u8 {
        let carry_in = self.regs.f.c;
        let (result, carry) = match op & 0x07 {
            // RLC
            0 => (value.rotate_left(1), value & 0x80 != 0),
            // RRC
            1 => (value.rotate_right(1), value & 0x01 != 0),
            // RL
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            // RR
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            // SLA
            4 => (value << 1, value & 0x80 != 0),
            // SRA
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            // SWAP
            6 => (value.rotate_left(4), false),
            // SRL
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.regs.f = Flags {
            z: result == 0,
            n: false,
            h: false,
            c: carry,
        };
        result
    }
}
