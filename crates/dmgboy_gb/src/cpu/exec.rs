//! Instruction handlers.
//!
//! Every handler has the uniform `Handler` shape so the dispatch tables can
//! hold plain function pointers: it receives the CPU, the bus and the opcode
//! byte that selected it, and returns the T-cycles consumed. Operand fields
//! (register index, pair index, condition code) are decoded from the opcode
//! inside the handler.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_nop(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        4
    }
}
