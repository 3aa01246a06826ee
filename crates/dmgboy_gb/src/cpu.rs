mod alu;
mod bus;
mod cb;
mod dispatch;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use bus::Bus;
pub use regs::{Flags, Registers};

/// DMG CPU core (Sharp LR35902).
///
/// Instruction-level interpreter: one call to `step` services a pending
/// interrupt or executes exactly one instruction and reports the T-cycles it
/// took. Memory and peripherals are reached only through a borrowed `Bus`.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable (IME).
    pub ime: bool,
    pub halted: bool,
    /// Set by `EI`; IME turns on once the instruction after `EI` retires.
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// When true, the CPU has hit an opcode hole. `step()` returns 0 cycles
    /// until reset.
    locked: bool,
}
