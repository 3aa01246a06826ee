use crate::cpu::{Bus, Cpu, Flags};

impl Cpu {
    /// `0x80..=0xBF`: ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r.
    pub(in crate::cpu) fn exec_alu_reg(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.alu_op((opcode >> 3) & 0x07, value);

        if src == 6 {
            8
        } else {
            4
        }
    }

    /// ALU operation with an 8-bit immediate operand.
    pub(in crate::cpu) fn exec_alu_imm(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));
        let value = self.fetch8(bus);
        self.alu_op((opcode >> 3) & 0x07, value);
        8
    }

    /// RLCA / RRCA / RLA / RRA.
    ///
    /// Same rotation as the CB forms, but Z is always cleared.
    pub(in crate::cpu) fn exec_rotate_a(&mut self, _bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));
        let a = self.regs.a;
        self.regs.a = self.alu_shift(opcode >> 3, a);
        self.regs.f.z = false;
        4
    }

    pub(in crate::cpu) fn exec_add_hl_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = self.regs.rp(opcode >> 4);
        self.alu_add16_hl(value);
        8
    }

    pub(in crate::cpu) fn exec_add_sp_r8(&mut self, bus: &mut dyn Bus, _opcode: u8) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(in crate::cpu) fn exec_ld_hl_sp_r8(&mut self, bus: &mut dyn Bus, _opcode: u8) -> u32 {
        let imm = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        12
    }

    pub(in crate::cpu) fn exec_daa(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.alu_daa();
        4
    }

    pub(in crate::cpu) fn exec_cpl(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.regs.a = !self.regs.a;
        self.regs.f.n = true;
        self.regs.f.h = true;
        4
    }

    pub(in crate::cpu) fn exec_scf(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.regs.f = Flags {
            z: self.regs.f.z,
            n: false,
            h: false,
            c: true,
        };
        4
    }

    pub(in crate::cpu) fn exec_ccf(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.regs.f = Flags {
            z: self.regs.f.z,
            n: false,
            h: false,
            c: !self.regs.f.c,
        };
        4
    }
}
