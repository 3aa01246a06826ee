/// Host keys the emulator cores know how to map.
///
/// This is deliberately a small, frontend-neutral subset; each frontend
/// translates its own key codes into these values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Z,
    X,
    A,
    S,
    Return,
    Escape,
}
