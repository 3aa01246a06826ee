/// The CPU's view of the address space.
///
/// The CPU never owns memory or peripherals; it borrows something that
/// implements this trait for the duration of one `step`. Time only moves
/// when the driving loop feeds the cycle count returned by `Cpu::step` back
/// into `tick`.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance bus-side peripherals by a given number of CPU cycles.
    ///
    /// Default implementation does nothing; flat test buses have no
    /// peripherals to drive.
    fn tick(&mut self, _cycles: u32) {}
}
