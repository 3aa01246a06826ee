use super::{Cpu, Registers};

/// Stack pointer value at reset: top of high RAM.
const RESET_SP: u16 = 0xFFFE;

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Create a CPU in its reset state (see `reset`).
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            locked: false,
        };
        cpu.reset();
        cpu
    }

    /// Reset to the state expected by the boot ROM: every register and flag
    /// cleared, PC at the 0x0000 entry vector, SP at the top of high RAM,
    /// interrupts masked and HALT released.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.regs.pc = 0x0000;
        self.regs.sp = RESET_SP;
        self.ime = false;
        self.halted = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        self.locked = false;
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code at 0x0100.
    ///
    /// Used when the machine runs without a boot ROM image.
    pub fn apply_post_boot_state(&mut self) {
        self.reset();
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = RESET_SP;
        self.regs.pc = 0x0100;
    }

    /// True once an opcode hole has been executed.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
