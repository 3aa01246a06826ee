use super::{Bus, Cpu};
use crate::interrupts::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR};

/// T-cycles spent dispatching an interrupt.
pub(super) const INTERRUPT_SERVICE_CYCLES: u32 = 20;

impl Cpu {
    /// Requested and enabled interrupt lines (`IE & IF`), masked to the five
    /// defined sources.
    pub(super) fn pending_interrupts(&self, bus: &mut dyn Bus) -> InterruptFlags {
        let ie = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
        let iflags = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        ie & iflags
    }

    /// Service the highest-priority pending interrupt: clear its IF bit,
    /// disable IME, push PC and jump to its vector.
    pub(super) fn service_interrupt(&mut self, bus: &mut dyn Bus, pending: InterruptFlags) -> u32 {
        let Some(interrupt) = Interrupt::highest_priority(pending) else {
            return 0;
        };

        let iflags = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        bus.write8(IF_ADDR, (iflags - interrupt.flag()).bits());

        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        self.halted = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();

        log::debug!(
            "Servicing {:?} interrupt: PC=0x{:04X} -> 0x{:04X}",
            interrupt,
            pc,
            interrupt.vector()
        );

        INTERRUPT_SERVICE_CYCLES
    }
}
