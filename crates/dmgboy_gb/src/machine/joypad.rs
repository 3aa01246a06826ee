/// The eight DMG buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    /// Whether the button belongs to the direction row (P1 bit 4) rather
    /// than the action row (P1 bit 5).
    fn is_direction(self) -> bool {
        matches!(
            self,
            Button::Right | Button::Left | Button::Up | Button::Down
        )
    }

    /// Bit position within its row's low nibble.
    fn row_bit(self) -> u8 {
        match self {
            Button::Right | Button::A => 0,
            Button::Left | Button::B => 1,
            Button::Up | Button::Select => 2,
            Button::Down | Button::Start => 3,
        }
    }
}

/// Select the direction row when this P1 bit is 0.
const SELECT_DIRECTIONS: u8 = 0x10;
/// Select the action row when this P1 bit is 0.
const SELECT_ACTIONS: u8 = 0x20;

/// Joypad latch (P1 / FF00).
///
/// Button masks use bit=1 to mean "pressed":
/// - directions: bit0=Right, bit1=Left, bit2=Up, bit3=Down
/// - actions:    bit0=A, bit1=B, bit2=Select, bit3=Start
///
/// The register itself is active-low, so reads invert them.
#[derive(Clone, Debug)]
pub struct Joypad {
    select: u8,
    directions: u8,
    actions: u8,
    pending_interrupt: bool,
}

impl Default for Joypad {
    fn default() -> Self {
        Self {
            // No row selected.
            select: SELECT_DIRECTIONS | SELECT_ACTIONS,
            directions: 0,
            actions: 0,
            pending_interrupt: false,
        }
    }
}

impl Joypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read8(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & SELECT_DIRECTIONS == 0 {
            low &= !self.directions;
        }
        if self.select & SELECT_ACTIONS == 0 {
            low &= !self.actions;
        }
        0xC0 | self.select | (low & 0x0F)
    }

    /// Only the two row-select bits are writable.
    pub fn write8(&mut self, value: u8) {
        self.select = value & (SELECT_DIRECTIONS | SELECT_ACTIONS);
    }

    /// Report and clear the pending joypad interrupt.
    pub fn tick(&mut self) -> bool {
        std::mem::take(&mut self.pending_interrupt)
    }

    /// Update one button. Only a released-to-pressed transition requests
    /// the joypad interrupt.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        let row = if button.is_direction() {
            &mut self.directions
        } else {
            &mut self.actions
        };
        let mask = 1u8 << button.row_bit();
        let was_pressed = *row & mask != 0;

        if pressed {
            *row |= mask;
            if !was_pressed {
                self.pending_interrupt = true;
            }
        } else {
            *row &= !mask;
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        let row = if button.is_direction() {
            self.directions
        } else {
            self.actions
        };
        row & (1 << button.row_bit()) != 0
    }

    pub fn set_right(&mut self, pressed: bool) {
        self.set_button(Button::Right, pressed);
    }

    pub fn set_left(&mut self, pressed: bool) {
        self.set_button(Button::Left, pressed);
    }

    pub fn set_up(&mut self, pressed: bool) {
        self.set_button(Button::Up, pressed);
    }

    pub fn set_down(&mut self, pressed: bool) {
        self.set_button(Button::Down, pressed);
    }

    pub fn set_a(&mut self, pressed: bool) {
        self.set_button(Button::A, pressed);
    }

    pub fn set_b(&mut self, pressed: bool) {
        self.set_button(Button::B, pressed);
    }

    pub fn set_select(&mut self, pressed: bool) {
        self.set_button(Button::Select, pressed);
    }

    pub fn set_start(&mut self, pressed: bool) {
        self.set_button(Button::Start, pressed);
    }
}
