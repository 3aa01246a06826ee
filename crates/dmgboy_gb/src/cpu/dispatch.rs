//! Opcode dispatch tables.
//!
//! Both tables are built at compile time from the opcode bit fields. An empty
//! slot in the base table is one of the eleven opcode holes
//! (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD) that hard-lock the CPU.

use super::{Bus, Cpu};

/// Uniform instruction handler: CPU, bus, opcode byte in; T-cycles out.
pub(super) type Handler = fn(&mut Cpu, &mut dyn Bus, u8) -> u32;

static OPCODES: [Option<Handler>; 256] = build_base_table();
static CB_OPCODES: [Handler; 256] = build_cb_table();

const fn build_base_table() -> [Option<Handler>; 256] {
    let mut table: [Option<Handler>; 256] = [None; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_base(i as u8);
        i += 1;
    }
    table
}

const fn build_cb_table() -> [Handler; 256] {
    let mut table: [Handler; 256] = [Cpu::cb_shift as Handler; 256];
    let mut i = 0;
    while i < 256 {
        let handler: Handler = match i >> 6 {
            0 => Cpu::cb_shift,
            1 => Cpu::cb_bit,
            2 => Cpu::cb_res,
            _ => Cpu::cb_set,
        };
        table[i] = handler;
        i += 1;
    }
    table
}

const fn decode_base(op: u8) -> Option<Handler> {
    let handler: Handler = match op {
        0x00 => Cpu::exec_nop,
        0x10 => Cpu::exec_stop,
        0x76 => Cpu::exec_halt,
        0xF3 => Cpu::exec_di,
        0xFB => Cpu::exec_ei,
        0xCB => Cpu::exec_prefix_cb,

        // Loads.
        0x01 | 0x11 | 0x21 | 0x31 => Cpu::exec_ld_rr_d16,
        0x02 | 0x12 | 0x22 | 0x32 => Cpu::exec_ld_indirect_a,
        0x0A | 0x1A | 0x2A | 0x3A => Cpu::exec_ld_a_indirect,
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => Cpu::exec_ld_r_d8,
        0x40..=0x7F => Cpu::exec_ld_r_r,
        0x08 => Cpu::exec_ld_a16_sp,
        0xE0 | 0xF0 => Cpu::exec_ldh_a8,
        0xE2 | 0xF2 => Cpu::exec_ldh_c,
        0xEA | 0xFA => Cpu::exec_ld_a16_a,
        0xF8 => Cpu::exec_ld_hl_sp_r8,
        0xF9 => Cpu::exec_ld_sp_hl,

        // 8/16-bit arithmetic.
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => Cpu::exec_inc8,
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => Cpu::exec_dec8,
        0x03 | 0x13 | 0x23 | 0x33 => Cpu::exec_inc16,
        0x0B | 0x1B | 0x2B | 0x3B => Cpu::exec_dec16,
        0x09 | 0x19 | 0x29 | 0x39 => Cpu::exec_add_hl_rr,
        0xE8 => Cpu::exec_add_sp_r8,
        0x80..=0xBF => Cpu::exec_alu_reg,
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => Cpu::exec_alu_imm,
        0x07 | 0x0F | 0x17 | 0x1F => Cpu::exec_rotate_a,
        0x27 => Cpu::exec_daa,
        0x2F => Cpu::exec_cpl,
        0x37 => Cpu::exec_scf,
        0x3F => Cpu::exec_ccf,

        // Control flow.
        0x18 => Cpu::exec_jr,
        0x20 | 0x28 | 0x30 | 0x38 => Cpu::exec_jr_cc,
        0xC3 => Cpu::exec_jp_a16,
        0xC2 | 0xCA | 0xD2 | 0xDA => Cpu::exec_jp_cc,
        0xE9 => Cpu::exec_jp_hl,
        0xCD => Cpu::exec_call_a16,
        0xC4 | 0xCC | 0xD4 | 0xDC => Cpu::exec_call_cc,
        0xC9 => Cpu::exec_ret,
        0xC0 | 0xC8 | 0xD0 | 0xD8 => Cpu::exec_ret_cc,
        0xD9 => Cpu::exec_reti,
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => Cpu::exec_rst,

        // Stack.
        0xC5 | 0xD5 | 0xE5 | 0xF5 => Cpu::exec_push,
        0xC1 | 0xD1 | 0xE1 | 0xF1 => Cpu::exec_pop,

        _ => return None,
    };
    Some(handler)
}

impl Cpu {
    /// Execute one already-fetched base opcode and return its T-cycles.
    ///
    /// An opcode hole locks the CPU and reports 0 cycles.
    pub(super) fn exec_opcode(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        match OPCODES[opcode as usize] {
            Some(handler) => handler(self, bus, opcode),
            None => {
                if !self.locked {
                    let opcode_addr = self.regs.pc.wrapping_sub(1);
                    log::error!(
                        "CPU locked: invalid opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                        opcode = opcode,
                        pc = opcode_addr,
                        sp = self.regs.sp,
                        af = self.regs.af(),
                        bc = self.regs.bc(),
                        de = self.regs.de(),
                        hl = self.regs.hl(),
                    );
                }
                self.locked = true;
                0
            }
        }
    }

    /// Execute the second byte of a CB-prefixed instruction.
    pub(in crate::cpu) fn exec_cb(&mut self, bus: &mut dyn Bus, cb: u8) -> u32 {
        CB_OPCODES[cb as usize](self, bus, cb)
    }
}

#[cfg(test)]
mod table_tests {
    use super::OPCODES;

    #[test]
    fn exactly_eleven_holes() {
        let holes: Vec<u8> = (0..=255u8)
            .filter(|&op| OPCODES[op as usize].is_none())
            .collect();
        assert_eq!(
            holes,
            vec![0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
        );
    }
}
