use bitflags::bitflags;

/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;
/// Interrupt request register (IF).
pub const IF_ADDR: u16 = 0xFF0F;

bitflags! {
    /// Bit layout shared by IE and IF.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const JOYPAD = 0b0001_0000;
        const SERIAL = 0b0000_1000;
        const TIMER  = 0b0000_0100;
        const STAT   = 0b0000_0010;
        const VBLANK = 0b0000_0001;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// All sources, highest priority first.
    pub const PRIORITY_ORDER: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::Stat => InterruptFlags::STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Handler address: `0x40 + 8 * bit`.
    pub fn vector(self) -> u16 {
        0x40 + 8 * self.flag().bits().trailing_zeros() as u16
    }

    /// Highest-priority source set in `pending`, if any.
    pub fn highest_priority(pending: InterruptFlags) -> Option<Interrupt> {
        Self::PRIORITY_ORDER
            .into_iter()
            .find(|interrupt| pending.contains(interrupt.flag()))
    }
}

impl From<Interrupt> for InterruptFlags {
    fn from(interrupt: Interrupt) -> Self {
        interrupt.flag()
    }
}
