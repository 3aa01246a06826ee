use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// STOP is treated as a 2-byte no-op: the padding byte is consumed so PC
    /// matches hardware, and no low-power state is entered.
    pub(in crate::cpu) fn exec_stop(&mut self, bus: &mut dyn Bus, _opcode: u8) -> u32 {
        let _padding = self.fetch8(bus);
        4
    }

    /// HALT: sleep until `IE & IF` becomes nonzero.
    pub(in crate::cpu) fn exec_halt(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.halted = true;
        4
    }

    pub(in crate::cpu) fn exec_di(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    pub(in crate::cpu) fn exec_ei(&mut self, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
        4
    }

    /// Prefix byte: fetch the second opcode and dispatch through the CB table.
    pub(in crate::cpu) fn exec_prefix_cb(&mut self, bus: &mut dyn Bus, _opcode: u8) -> u32 {
        let cb = self.fetch8(bus);
        self.exec_cb(bus, cb)
    }
}
