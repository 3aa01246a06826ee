use dmgboy_common::Color;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::{LcdControl, Ppu, Sprite, MAX_SPRITES_PER_LINE};

/// Sprite attribute bits (OAM byte 3).
const ATTR_BG_PRIORITY: u8 = 0x80;
const ATTR_FLIP_Y: u8 = 0x40;
const ATTR_FLIP_X: u8 = 0x20;
const ATTR_PALETTE_1: u8 = 0x10;

/// DMG shades for palette values 0-3, lightest first.
const SHADES: [Color; 4] = [
    Color::gray(0xFF),
    Color::gray(0xAA),
    Color::gray(0x55),
    Color::gray(0x00),
];

/// Map a 2-bit color index through a palette register.
#[inline]
fn shade(palette: u8, color_index: u8) -> Color {
    SHADES[((palette >> (color_index * 2)) & 0x03) as usize]
}

/// 2-bit color index of pixel `x` (0 = leftmost) in a tile row.
#[inline]
fn tile_row_pixel(lo: u8, hi: u8, x: u8) -> u8 {
    let bit = 7 - (x & 0x07);
    (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
}

impl Ppu {
    #[inline]
    fn vram_at(&self, addr: u16) -> u8 {
        self.vram[(addr as usize).wrapping_sub(0x8000) % self.vram.len()]
    }

    /// OAM search: select up to ten sprites overlapping LY with a nonzero X,
    /// keeping table order.
    pub(super) fn search_sprites(&mut self) {
        self.line_sprites.clear();
        let ly = self.ly as i16;
        let height = self.lcdc.sprite_height() as i16;

        for entry in self.oam.chunks_exact(4) {
            if self.line_sprites.len() == MAX_SPRITES_PER_LINE {
                break;
            }
            let sprite = Sprite {
                y: entry[0],
                x: entry[1],
                tile: entry[2],
                attrs: entry[3],
            };
            let top = sprite.y as i16 - 16;
            if sprite.x != 0 && ly >= top && ly < top + height {
                self.line_sprites.push(sprite);
            }
        }
    }

    /// Background/window color index at a pixel of a 256x256 tile map.
    fn tile_map_pixel(&self, map_base: u16, x: u8, y: u8) -> u8 {
        let map_addr = map_base + ((y as u16 >> 3) << 5) + (x as u16 >> 3);
        let tile = self.vram_at(map_addr);

        let tile_addr = if self.lcdc.contains(LcdControl::TILE_DATA_UNSIGNED) {
            0x8000 + tile as u16 * 16
        } else {
            // 0x9000-based, signed tile index.
            0x9000u16.wrapping_add((tile as i8 as i16 * 16) as u16)
        };
        let row_addr = tile_addr + ((y as u16 & 0x07) << 1);

        let lo = self.vram_at(row_addr);
        let hi = self.vram_at(row_addr + 1);
        tile_row_pixel(lo, hi, x)
    }

    #[inline]
    fn put_pixel(&mut self, x: usize, color: Color) {
        let idx = (self.ly as usize * SCREEN_WIDTH + x) * 4;
        self.framebuffer[idx..idx + 4].copy_from_slice(&color.rgba());
    }

    /// Paint scanline LY: background, then window, then sprites.
    pub(super) fn render_scanline(&mut self) {
        if self.ly as usize >= SCREEN_HEIGHT {
            return;
        }

        let ly = self.ly;
        let bg_enabled = self.lcdc.contains(LcdControl::BG_WINDOW_ENABLE);
        let window_active =
            bg_enabled && self.lcdc.contains(LcdControl::WINDOW_ENABLE) && ly >= self.wy;

        // Color index per column, before the palette; sprites with the
        // background-priority bit need it.
        let mut bg_index = [0u8; SCREEN_WIDTH];

        for (x, slot) in bg_index.iter_mut().enumerate() {
            let index = if !bg_enabled {
                0
            } else if window_active && x + 7 >= self.wx as usize {
                let win_x = (x + 7 - self.wx as usize) as u8;
                let win_y = ly - self.wy;
                self.tile_map_pixel(self.lcdc.window_map_base(), win_x, win_y)
            } else {
                let bg_x = (x as u8).wrapping_add(self.scx);
                let bg_y = ly.wrapping_add(self.scy);
                self.tile_map_pixel(self.lcdc.bg_map_base(), bg_x, bg_y)
            };
            *slot = index;
        }

        for (x, &index) in bg_index.iter().enumerate() {
            let color = shade(self.bgp, index);
            self.put_pixel(x, color);
        }

        if self.lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.render_sprites(&bg_index);
        }
    }

    /// Composite the line's sprites. Per column the first sprite in table
    /// order with an opaque pixel wins; if its priority bit is set and the
    /// background index is nonzero, the background stays.
    fn render_sprites(&mut self, bg_index: &[u8; SCREEN_WIDTH]) {
        let ly = self.ly as i16;
        let height = self.lcdc.sprite_height() as i16;

        for x in 0..SCREEN_WIDTH as i16 {
            let mut winner: Option<Color> = None;

            for sprite in &self.line_sprites {
                let left = sprite.x as i16 - 8;
                if x < left || x >= left + 8 {
                    continue;
                }

                let mut row = ly - (sprite.y as i16 - 16);
                if row < 0 || row >= height {
                    // Selected under a different sprite size.
                    continue;
                }
                if sprite.attrs & ATTR_FLIP_Y != 0 {
                    row = height - 1 - row;
                }
                let mut col = (x - left) as u8;
                if sprite.attrs & ATTR_FLIP_X != 0 {
                    col = 7 - col;
                }

                let tile = if height == 16 {
                    sprite.tile & 0xFE
                } else {
                    sprite.tile
                };
                let row_addr = 0x8000 + tile as u16 * 16 + (row as u16) * 2;
                let lo = self.vram_at(row_addr);
                let hi = self.vram_at(row_addr + 1);
                let index = tile_row_pixel(lo, hi, col);
                if index == 0 {
                    continue;
                }

                if sprite.attrs & ATTR_BG_PRIORITY == 0 || bg_index[x as usize] == 0 {
                    let palette = if sprite.attrs & ATTR_PALETTE_1 != 0 {
                        self.obp1
                    } else {
                        self.obp0
                    };
                    winner = Some(shade(palette, index));
                }
                break;
            }

            if let Some(color) = winner {
                self.put_pixel(x as usize, color);
            }
        }
    }
}
