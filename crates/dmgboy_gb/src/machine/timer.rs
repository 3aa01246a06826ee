/// Timer / divider unit.
///
/// A pure function of elapsed cycles: `tick` folds a batch of CPU T-cycles
/// into two accumulators, one for the free-running divider (DIV, every 256
/// cycles) and one for the programmable counter (TIMA, at the rate selected
/// by TAC). Register access lives in `io`.
pub(crate) mod io;

/// T-cycles per DIV increment.
const DIV_PERIOD: u32 = 256;

/// TAC enable bit.
const TAC_ENABLE: u8 = 0x04;

#[derive(Clone, Debug, Default)]
pub struct Timer {
    /// DIV (FF04).
    div: u8,
    /// Cycles accumulated towards the next DIV increment.
    div_cycles: u32,
    /// TIMA (FF05).
    tima: u8,
    /// TMA (FF06).
    tma: u8,
    /// TAC (FF07), stored as written.
    tac: u8,
    /// Cycles accumulated towards the next TIMA increment. Only grows while
    /// the timer is enabled.
    tima_cycles: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.tac & TAC_ENABLE != 0
    }

    /// TIMA input period in T-cycles selected by TAC[1:0].
    #[inline]
    fn tima_period(&self) -> u32 {
        match self.tac & 0x03 {
            0x00 => 1024,
            0x01 => 16,
            0x02 => 64,
            _ => 256,
        }
    }

    /// Advance the timer by `cycles` T-cycles.
    ///
    /// Returns true when TIMA overflowed at least once during this batch;
    /// each overflow reloads TIMA from TMA.
    pub fn tick(&mut self, cycles: u32) -> bool {
        self.div_cycles += cycles;
        while self.div_cycles >= DIV_PERIOD {
            self.div_cycles -= DIV_PERIOD;
            self.div = self.div.wrapping_add(1);
        }

        if !self.enabled() {
            return false;
        }

        let period = self.tima_period();
        let mut overflowed = false;
        self.tima_cycles += cycles;
        while self.tima_cycles >= period {
            self.tima_cycles -= period;
            let (next, overflow) = self.tima.overflowing_add(1);
            if overflow {
                self.tima = self.tma;
                overflowed = true;
            } else {
                self.tima = next;
            }
        }
        overflowed
    }
}
