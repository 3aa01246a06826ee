use crate::key::Key;

/// Host-facing contract for an emulated machine.
///
/// A host (windowed frontend, headless runner, test harness) owns the outer
/// loop and calls `update` once per presented frame. Everything about window
/// management, pacing and input polling stays on the host side.
pub trait App {
    fn init(&mut self);
    /// Advance the machine by one frame and copy the resulting RGBA pixels
    /// (`width() * height() * 4` bytes) into `screen`.
    fn update(&mut self, screen: &mut [u8]);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;

    /// Size in bytes of the RGBA screen buffer expected by `update`.
    fn screen_len(&self) -> usize {
        (self.width() * self.height() * 4) as usize
    }
}
