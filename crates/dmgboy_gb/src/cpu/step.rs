use super::{Bus, Cpu};

impl Cpu {
    /// Execute a single step and return the number of T-cycles consumed.
    ///
    /// A step is one of:
    /// - 0 when the CPU is locked by an opcode hole,
    /// - an interrupt dispatch (20 cycles) when IME is set and `IE & IF` is
    ///   nonzero,
    /// - 4 idle cycles while halted with nothing pending,
    /// - one fetched and executed instruction.
    pub fn step(&mut self, bus: &mut dyn Bus) -> u32 {
        if self.locked {
            return 0;
        }

        let pending = self.pending_interrupts(bus);

        if self.halted {
            if pending.is_empty() {
                return 4;
            }
            // Any requested and enabled interrupt wakes the CPU, even with
            // IME clear.
            self.halted = false;
        }

        if self.ime && !pending.is_empty() {
            return self.service_interrupt(bus, pending);
        }

        let opcode = self.fetch8(bus);
        let cycles = self.exec_opcode(bus, opcode);
        self.update_ime_delay();
        cycles
    }

    /// Advance the EI delay: the instruction after `EI` runs with IME still
    /// clear, and IME is set once it retires.
    fn update_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        }
        if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
