pub mod app;
pub mod key;

/// 8-bit RGBA color.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new_rgb(0xFF, 0xFF, 0xFF);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    /// Opaque gray with all three channels set to `level`.
    #[inline]
    pub const fn gray(level: u8) -> Color {
        Color::new_rgb(level, level, level)
    }

    #[inline]
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.rgba())
    }
}
