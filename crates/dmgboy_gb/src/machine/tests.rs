use dmgboy_common::key::Key;

use super::{Button, Cartridge, GameBoy, GameBoyBus, MbcKind, Ppu, PpuMode, Timer};
use crate::cpu::Bus;
use crate::interrupts::InterruptFlags;
use crate::SCREEN_WIDTH;

const BANK: usize = 0x4000;

/// Cartridge image of `banks` 16 KiB banks; every byte of bank N holds N,
/// except the header fields.
fn cart_image(cart_type: u8, rom_code: u8, ram_code: u8, banks: usize) -> Vec<u8> {
    let mut rom = vec![0u8; banks * BANK];
    for (bank, chunk) in rom.chunks_mut(BANK).enumerate() {
        chunk.fill(bank as u8);
    }
    rom[0x134..0x138].copy_from_slice(b"TEST");
    rom[0x138] = 0;
    rom[0x147] = cart_type;
    rom[0x148] = rom_code;
    rom[0x149] = ram_code;
    rom
}

/// 32 KiB no-banking image with `program` placed at the 0x0100 entry point.
fn program_image(program: &[u8]) -> Vec<u8> {
    let mut rom = cart_image(0x00, 0x00, 0x00, 2);
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    rom
}

fn pixel(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
    let idx = (y * SCREEN_WIDTH + x) * 4;
    [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
}

// --- Timer -----------------------------------------------------------------

#[test]
fn timer_1024_divisor_counts_256_and_reloads_once() {
    let mut timer = Timer::new();
    timer.write8(0xFF06, 0x10);
    timer.write8(0xFF07, 0x04);

    let mut overflows = 0;
    for _ in 0..(1024 * 256 / 4) {
        if timer.tick(4) {
            overflows += 1;
        }
    }

    assert_eq!(overflows, 1);
    assert_eq!(timer.read8(0xFF05), 0x10);
}

#[test]
fn timer_large_batch_reports_overflow() {
    let mut timer = Timer::new();
    timer.write8(0xFF07, 0x04);
    assert!(timer.tick(1024 * 256));
    assert_eq!(timer.read8(0xFF05), 0x00);
    // DIV advanced once per 256 cycles and wrapped.
    assert_eq!(timer.read8(0xFF04), 0x00);
}

#[test]
fn timer_fast_divisor_and_overflow_reload() {
    let mut timer = Timer::new();
    timer.write8(0xFF07, 0x05);
    timer.write8(0xFF06, 0xAB);
    timer.write8(0xFF05, 0xFE);

    assert!(!timer.tick(16));
    assert_eq!(timer.read8(0xFF05), 0xFF);
    assert!(timer.tick(16));
    assert_eq!(timer.read8(0xFF05), 0xAB);
}

#[test]
fn timer_disabled_leaves_tima_alone() {
    let mut timer = Timer::new();
    timer.write8(0xFF07, 0x01);
    assert!(!timer.tick(4096));
    assert_eq!(timer.read8(0xFF05), 0);
    assert_eq!(timer.read8(0xFF04), 16);
}

#[test]
fn div_write_resets_counter_and_accumulator() {
    let mut timer = Timer::new();
    timer.tick(256 * 3 + 200);
    assert_eq!(timer.read8(0xFF04), 3);

    timer.write8(0xFF04, 0x5A);
    assert_eq!(timer.read8(0xFF04), 0);
    timer.tick(255);
    assert_eq!(timer.read8(0xFF04), 0);
    timer.tick(1);
    assert_eq!(timer.read8(0xFF04), 1);
}

// --- Cartridge -------------------------------------------------------------

#[test]
fn rom_only_reads_image_directly() {
    let mut rom = vec![0u8; 2 * BANK];
    for (i, byte) in rom.iter_mut().enumerate() {
        *byte = (i % 251) as u8;
    }
    rom[0x147] = 0x00;
    rom[0x148] = 0x00;
    rom[0x149] = 0x00;

    let mut cart = Cartridge::load(&rom).unwrap();
    assert_eq!(cart.kind(), MbcKind::RomOnly);

    // Banking writes have no effect.
    cart.write8(0x2000, 0x05);
    cart.write8(0x0000, 0x0A);
    for addr in 0..0x8000u16 {
        assert_eq!(cart.read8(addr), rom[addr as usize], "addr 0x{addr:04X}");
    }
    assert_eq!(cart.read8(0xA000), 0xFF);
    assert!(cart.ram().is_empty());
}

#[test]
fn mbc1_bank_switch_via_0x2100() {
    let rom = cart_image(0x01, 0x01, 0x00, 4);
    let mut cart = Cartridge::load(&rom).unwrap();
    assert_eq!(cart.kind(), MbcKind::Mbc1);
    assert_eq!(cart.read8(0x4000), 1);

    cart.write8(0x2100, 0x02);
    assert_eq!(cart.read8(0x4000), rom[2 * BANK]);
    assert_eq!(cart.read8(0x7FFF), 2);
    // Fixed bank is unaffected.
    assert_eq!(cart.read8(0x0000), 0);

    // Bank 0 is remapped to bank 1.
    cart.write8(0x2000, 0x00);
    assert_eq!(cart.read8(0x4000), 1);

    // Bank numbers wrap at the image size.
    cart.write8(0x2000, 0x06);
    assert_eq!(cart.read8(0x4000), 2);
}

#[test]
fn mbc1_advanced_mode_banks_low_area() {
    // 2 MiB image: 128 banks.
    let rom = cart_image(0x01, 0x06, 0x00, 128);
    let mut cart = Cartridge::load(&rom).unwrap();

    cart.write8(0x4000, 0x01);
    cart.write8(0x2000, 0x03);
    assert_eq!(cart.read8(0x4000), 0x03);
    assert_eq!(cart.read8(0x0000), 0x00);

    cart.write8(0x6000, 0x01);
    assert_eq!(cart.read8(0x0000), 0x20);
    assert_eq!(cart.read8(0x4000), 0x03);
}

#[test]
fn mbc1_high_bits_do_not_extend_switchable_bank() {
    // 1 MiB image: 64 banks.
    let rom = cart_image(0x01, 0x05, 0x00, 64);
    let mut cart = Cartridge::load(&rom).unwrap();

    cart.write8(0x4000, 0x01);
    cart.write8(0x2000, 0x02);
    assert_eq!(cart.read8(0x4000), 0x02);

    cart.write8(0x6000, 0x01);
    assert_eq!(cart.read8(0x4000), 0x02);
}

#[test]
fn mbc1_ram_bank_applies_in_simple_mode() {
    let rom = cart_image(0x03, 0x01, 0x03, 4);
    let mut cart = Cartridge::load(&rom).unwrap();
    assert_eq!(cart.ram().len(), 32 * 1024);

    cart.write8(0x0000, 0x0A);
    cart.write8(0x4000, 0x01);
    cart.write8(0xA000, 0x55);
    assert_eq!(cart.ram()[0x2000], 0x55);
    assert_eq!(cart.ram()[0], 0xFF);

    cart.write8(0x4000, 0x00);
    assert_eq!(cart.read8(0xA000), 0xFF);
    cart.write8(0x4000, 0x01);
    assert_eq!(cart.read8(0xA000), 0x55);

    // Advanced mode keeps the same RAM bank.
    cart.write8(0x6000, 0x01);
    assert_eq!(cart.read8(0xA000), 0x55);
}

#[test]
fn mbc1_ram_requires_enable() {
    let rom = cart_image(0x03, 0x01, 0x02, 4);
    let mut cart = Cartridge::load(&rom).unwrap();
    assert_eq!(cart.ram().len(), 8 * 1024);

    cart.write8(0xA000, 0x42);
    assert_eq!(cart.read8(0xA000), 0xFF);

    cart.write8(0x0000, 0x0A);
    cart.write8(0xA000, 0x42);
    assert_eq!(cart.read8(0xA000), 0x42);

    cart.write8(0x0000, 0x00);
    assert_eq!(cart.read8(0xA000), 0xFF);
    assert_eq!(cart.ram()[0], 0x42);
}

#[test]
fn mbc3_rom_and_ram_banks() {
    let rom = cart_image(0x13, 0x02, 0x03, 8);
    let mut cart = Cartridge::load(&rom).unwrap();
    assert_eq!(cart.kind(), MbcKind::Mbc3);
    assert!(cart.battery());

    cart.write8(0x2000, 0x05);
    assert_eq!(cart.read8(0x4000), 5);
    cart.write8(0x2000, 0x00);
    assert_eq!(cart.read8(0x4000), 1);

    cart.write8(0x0000, 0x0A);
    cart.write8(0x4000, 0x02);
    cart.write8(0xA000, 0x77);
    cart.write8(0x4000, 0x00);
    assert_eq!(cart.read8(0xA000), 0xFF);
    cart.write8(0x4000, 0x02);
    assert_eq!(cart.read8(0xA000), 0x77);
    assert_eq!(cart.ram()[2 * 0x2000], 0x77);

    // RTC registers are not mapped.
    cart.write8(0x4000, 0x08);
    assert_eq!(cart.read8(0xA000), 0xFF);
}

#[test]
fn mbc3_rtc_selects_do_not_alias_ram_banks() {
    let rom = cart_image(0x13, 0x02, 0x03, 8);
    let mut cart = Cartridge::load(&rom).unwrap();
    cart.write8(0x0000, 0x0A);

    for select in 0x08..=0x0C {
        cart.write8(0x4000, select);
        cart.write8(0xA000, 0x42);
        assert_eq!(cart.read8(0xA000), 0xFF);
    }
    assert!(cart.ram().iter().all(|&b| b == 0xFF));

    cart.write8(0x4000, 0x01);
    assert_eq!(cart.read8(0xA000), 0xFF);
}

#[test]
fn short_image_is_rejected() {
    assert!(Cartridge::load(&[0u8; 0x100]).is_err());
}

#[test]
fn unknown_cartridge_type_maps_as_rom_only() {
    let rom = cart_image(0xFC, 0x00, 0x00, 2);
    let cart = Cartridge::load(&rom).unwrap();
    assert_eq!(cart.kind(), MbcKind::RomOnly);
    assert_eq!(cart.header().cartridge_type(), 0xFC);
    assert_eq!(cart.header().title(), "TEST");
}

#[test]
fn ram_load_checks_battery_and_length() {
    let no_battery = cart_image(0x02, 0x01, 0x02, 4);
    let mut cart = Cartridge::load(&no_battery).unwrap();
    assert!(cart.load_ram(&[0u8; 8 * 1024]).is_err());

    let battery = cart_image(0x03, 0x01, 0x02, 4);
    let mut cart = Cartridge::load(&battery).unwrap();
    assert!(cart.load_ram(&[0u8; 100]).is_err());
    assert!(cart.ram().iter().all(|&b| b == 0xFF));

    let mut save = vec![0u8; 8 * 1024];
    save[0x10] = 0x99;
    cart.load_ram(&save).unwrap();
    cart.write8(0x0000, 0x0A);
    assert_eq!(cart.read8(0xA010), 0x99);
}

// --- PPU -------------------------------------------------------------------

fn lcd_on(ppu: &mut Ppu, lcdc: u8) {
    ppu.write8(0xFF40, lcdc);
}

#[test]
fn scanline_mode_sequence_consumes_456_cycles() {
    let mut ppu = Ppu::new();
    lcd_on(&mut ppu, 0x91);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
    assert_eq!(ppu.ly(), 0);

    ppu.tick(79);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
    ppu.tick(1);
    assert_eq!(ppu.mode(), PpuMode::PixelTransfer);
    ppu.tick(172);
    assert_eq!(ppu.mode(), PpuMode::HBlank);
    assert_eq!(ppu.ly(), 0);
    ppu.tick(204);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
    assert_eq!(ppu.ly(), 1);

    // A single large batch crosses all three boundaries.
    ppu.tick(456);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
    assert_eq!(ppu.ly(), 2);
}

#[test]
fn vblank_raised_once_per_frame() {
    let mut ppu = Ppu::new();
    lcd_on(&mut ppu, 0x91);

    let mut vblanks = 0;
    let mut raised_at = None;
    for step in 0..(70_224 / 4) {
        if ppu.tick(4).contains(InterruptFlags::VBLANK) {
            vblanks += 1;
            raised_at = Some(step);
        }
    }

    assert_eq!(vblanks, 1);
    assert_eq!(raised_at, Some(144 * 456 / 4 - 1));
    assert!(ppu.take_frame_ready());
    assert!(!ppu.take_frame_ready());
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
}

#[test]
fn stat_fires_once_while_line_held_high() {
    let mut ppu = Ppu::new();
    ppu.write8(0xFF45, 0);
    ppu.write8(0xFF41, 0x40);
    lcd_on(&mut ppu, 0x91);

    // LY stays equal to LYC for the whole first line.
    let mut stats = 0;
    for _ in 0..(456 / 4) {
        if ppu.tick(4).contains(InterruptFlags::STAT) {
            stats += 1;
        }
    }
    assert_eq!(stats, 1);
    assert_eq!(ppu.ly(), 1);
    assert_eq!(ppu.read8(0xFF41) & 0x04, 0);
}

#[test]
fn stat_hblank_source_fires_every_visible_line() {
    let mut ppu = Ppu::new();
    ppu.write8(0xFF41, 0x08);
    lcd_on(&mut ppu, 0x91);

    let mut stats = 0;
    for _ in 0..(70_224 / 4) {
        if ppu.tick(4).contains(InterruptFlags::STAT) {
            stats += 1;
        }
    }
    assert_eq!(stats, 144);
}

#[test]
fn lcd_disable_resets_sequencer() {
    let mut ppu = Ppu::new();
    lcd_on(&mut ppu, 0x91);
    ppu.tick(456 * 3 + 100);
    assert_eq!(ppu.ly(), 3);
    assert_eq!(ppu.mode(), PpuMode::PixelTransfer);

    ppu.write8(0xFF40, 0x11);
    assert!(!ppu.lcd_enabled());
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.mode(), PpuMode::OamSearch);
    assert_eq!(ppu.read8(0xFF41) & 0x03, 0);

    assert!(ppu.tick(10_000).is_empty());
    assert_eq!(ppu.ly(), 0);

    ppu.write8(0xFF40, 0x91);
    ppu.tick(80);
    assert_eq!(ppu.mode(), PpuMode::PixelTransfer);
    assert_eq!(ppu.read8(0xFF41) & 0x03, 3);
}

#[test]
fn sprite_search_keeps_table_order_and_caps_at_ten() {
    let mut ppu = Ppu::new();
    // Entry 0 is hidden by X == 0, entry 13 is on another line.
    for i in 0..14u16 {
        let base = 0xFE00 + i * 4;
        let x = if i == 0 { 0 } else { 8 + i as u8 };
        let y = if i == 13 { 60 } else { 16 };
        ppu.write8(base, y);
        ppu.write8(base + 1, x);
        ppu.write8(base + 2, i as u8);
        ppu.write8(base + 3, 0);
    }
    lcd_on(&mut ppu, 0x93);

    let sprites = ppu.line_sprites();
    assert_eq!(sprites.len(), 10);
    let tiles: Vec<u8> = sprites.iter().map(|s| s.tile).collect();
    assert_eq!(tiles, (1..=10).collect::<Vec<u8>>());
}

#[test]
fn tall_sprites_cover_sixteen_lines() {
    let mut ppu = Ppu::new();
    // Top edge at line -8: only tall sprites reach line 0.
    ppu.write8(0xFE00, 8);
    ppu.write8(0xFE01, 20);
    lcd_on(&mut ppu, 0x93);
    assert!(ppu.line_sprites().is_empty());

    ppu.write8(0xFF40, 0x00);
    lcd_on(&mut ppu, 0x97);
    assert_eq!(ppu.line_sprites().len(), 1);
}

/// Tile 1: color index 1 on every pixel. Tile 2: color index 2.
fn load_test_tiles(ppu: &mut Ppu) {
    for row in 0..8u16 {
        ppu.write8(0x8010 + row * 2, 0xFF);
        ppu.write8(0x8011 + row * 2, 0x00);
        ppu.write8(0x8020 + row * 2, 0x00);
        ppu.write8(0x8021 + row * 2, 0xFF);
    }
    // Top-left background tile is tile 1, the rest tile 0.
    ppu.write8(0x9800, 0x01);
    ppu.write8(0xFF47, 0xE4);
    ppu.write8(0xFF48, 0xE4);
}

#[test]
fn background_line_rendered_through_palette() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    lcd_on(&mut ppu, 0x91);
    ppu.tick(80);

    let frame = ppu.framebuffer();
    assert_eq!(pixel(frame, 0, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(frame, 7, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(frame, 8, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn background_disabled_renders_color_zero() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    ppu.write8(0xFF47, 0xE7);
    lcd_on(&mut ppu, 0x90);
    ppu.tick(80);
    assert_eq!(pixel(ppu.framebuffer(), 0, 0), [0x00, 0x00, 0x00, 0xFF]);
}

#[test]
fn sprite_composited_over_background() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    // Screen X 4..12 on line 0, tile 2.
    ppu.write8(0xFE00, 16);
    ppu.write8(0xFE01, 12);
    ppu.write8(0xFE02, 2);
    ppu.write8(0xFE03, 0);
    lcd_on(&mut ppu, 0x93);
    ppu.tick(80);

    let frame = ppu.framebuffer();
    assert_eq!(pixel(frame, 3, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(frame, 4, 0), [0x55, 0x55, 0x55, 0xFF]);
    assert_eq!(pixel(frame, 11, 0), [0x55, 0x55, 0x55, 0xFF]);
    assert_eq!(pixel(frame, 12, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn sprite_behind_nonzero_background_with_priority_bit() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    ppu.write8(0xFE00, 16);
    ppu.write8(0xFE01, 12);
    ppu.write8(0xFE02, 2);
    ppu.write8(0xFE03, 0x80);
    lcd_on(&mut ppu, 0x93);
    ppu.tick(80);

    let frame = ppu.framebuffer();
    // Background index 1 under columns 4-7 wins, index 0 under 8-11 loses.
    assert_eq!(pixel(frame, 5, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(frame, 9, 0), [0x55, 0x55, 0x55, 0xFF]);
}

#[test]
fn sprites_hidden_when_obj_disabled() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    ppu.write8(0xFE00, 16);
    ppu.write8(0xFE01, 12);
    ppu.write8(0xFE02, 2);
    lcd_on(&mut ppu, 0x91);
    ppu.tick(80);
    assert_eq!(pixel(ppu.framebuffer(), 9, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn window_covers_background_from_wx_minus_seven() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    ppu.write8(0x9C00, 0x02);
    ppu.write8(0xFF4A, 0);
    ppu.write8(0xFF4B, 7);
    lcd_on(&mut ppu, 0xF1);
    ppu.tick(80);
    assert_eq!(pixel(ppu.framebuffer(), 0, 0), [0x55, 0x55, 0x55, 0xFF]);
    assert_eq!(pixel(ppu.framebuffer(), 8, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn window_gated_by_wy_and_offset_by_wx() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    ppu.write8(0x9C00, 0x02);
    ppu.write8(0xFF4A, 1);
    ppu.write8(0xFF4B, 15);
    lcd_on(&mut ppu, 0xF1);

    // Line 0 is above WY: background only.
    ppu.tick(80);
    assert_eq!(pixel(ppu.framebuffer(), 0, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(ppu.framebuffer(), 8, 0), [0xFF, 0xFF, 0xFF, 0xFF]);

    // Line 1 starts the window at its own row 0, from screen X 8.
    ppu.tick(456);
    assert_eq!(ppu.ly(), 1);
    assert_eq!(pixel(ppu.framebuffer(), 7, 1), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(ppu.framebuffer(), 8, 1), [0x55, 0x55, 0x55, 0xFF]);
}

#[test]
fn window_map_select_uses_low_map_when_clear() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    ppu.write8(0x9C00, 0x02);
    ppu.write8(0xFF4A, 0);
    ppu.write8(0xFF4B, 15);
    lcd_on(&mut ppu, 0xB1);
    ppu.tick(80);
    // Window column 0 reads the 0x9800 map, which holds tile 1.
    assert_eq!(pixel(ppu.framebuffer(), 8, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
}

#[test]
fn window_hidden_when_disabled() {
    let mut ppu = Ppu::new();
    load_test_tiles(&mut ppu);
    ppu.write8(0x9C00, 0x02);
    ppu.write8(0xFF4B, 7);
    lcd_on(&mut ppu, 0xD1);
    ppu.tick(80);
    assert_eq!(pixel(ppu.framebuffer(), 0, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
}

#[test]
fn signed_tile_data_addressing() {
    let mut ppu = Ppu::new();
    ppu.write8(0xFF47, 0xE4);
    // Tile 1 lives at 0x9010, tile 0x80 (-128) at 0x8800.
    ppu.write8(0x9010, 0xFF);
    ppu.write8(0x9011, 0xFF);
    ppu.write8(0x8800, 0xFF);
    ppu.write8(0x8801, 0x00);
    // Unsigned tile 1 must not be used.
    ppu.write8(0x8010, 0x00);
    ppu.write8(0x8011, 0xFF);
    ppu.write8(0x9800, 0x01);
    ppu.write8(0x9801, 0x80);
    lcd_on(&mut ppu, 0x81);
    ppu.tick(80);

    let frame = ppu.framebuffer();
    assert_eq!(pixel(frame, 0, 0), [0x00, 0x00, 0x00, 0xFF]);
    assert_eq!(pixel(frame, 8, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
    // Tile 0 maps to 0x9000, which is blank.
    assert_eq!(pixel(frame, 16, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
}

/// Render line 0 with one sprite at screen X 0 using tile 3, whose row 0
/// has only its leftmost pixel set and row 7 only its rightmost.
fn render_marker_sprite(attrs: u8, obp1: u8) -> Vec<u8> {
    let mut ppu = Ppu::new();
    ppu.write8(0xFF47, 0xE4);
    ppu.write8(0xFF48, 0xE4);
    ppu.write8(0xFF49, obp1);
    ppu.write8(0x8030, 0x80);
    ppu.write8(0x803E, 0x01);
    ppu.write8(0xFE00, 16);
    ppu.write8(0xFE01, 8);
    ppu.write8(0xFE02, 3);
    ppu.write8(0xFE03, attrs);
    lcd_on(&mut ppu, 0x93);
    ppu.tick(80);
    ppu.framebuffer().to_vec()
}

const MARK: [u8; 4] = [0xAA, 0xAA, 0xAA, 0xFF];
const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

#[test]
fn sprite_flips() {
    let plain = render_marker_sprite(0x00, 0xE4);
    assert_eq!((pixel(&plain, 0, 0), pixel(&plain, 7, 0)), (MARK, WHITE));

    let flip_x = render_marker_sprite(0x20, 0xE4);
    assert_eq!((pixel(&flip_x, 0, 0), pixel(&flip_x, 7, 0)), (WHITE, MARK));

    let flip_y = render_marker_sprite(0x40, 0xE4);
    assert_eq!((pixel(&flip_y, 0, 0), pixel(&flip_y, 7, 0)), (WHITE, MARK));

    let flip_xy = render_marker_sprite(0x60, 0xE4);
    assert_eq!((pixel(&flip_xy, 0, 0), pixel(&flip_xy, 7, 0)), (MARK, WHITE));
}

#[test]
fn sprite_palette_select() {
    let obp0 = render_marker_sprite(0x00, 0x1B);
    assert_eq!(pixel(&obp0, 0, 0), [0xAA, 0xAA, 0xAA, 0xFF]);

    let obp1 = render_marker_sprite(0x10, 0x1B);
    assert_eq!(pixel(&obp1, 0, 0), [0x55, 0x55, 0x55, 0xFF]);
}

// --- Joypad ----------------------------------------------------------------

#[test]
fn joypad_interrupt_only_on_press_edge() {
    let mut joypad = super::Joypad::new();
    joypad.set_button(Button::A, true);
    assert!(joypad.tick());
    assert!(!joypad.tick());

    // Holding or releasing does not re-trigger.
    joypad.set_a(true);
    assert!(!joypad.tick());
    joypad.set_a(false);
    assert!(!joypad.tick());

    joypad.set_start(true);
    assert!(joypad.tick());
    assert!(joypad.is_pressed(Button::Start));
}

#[test]
fn joypad_reads_selected_row_active_low() {
    let mut joypad = super::Joypad::new();
    joypad.set_right(true);
    joypad.set_b(true);
    assert_eq!(joypad.read8(), 0xFF);

    joypad.write8(0x20);
    assert_eq!(joypad.read8(), 0xEE);
    joypad.write8(0x10);
    assert_eq!(joypad.read8(), 0xDD);
}

// --- Bus -------------------------------------------------------------------

#[test]
fn bus_regions_round_trip() {
    let mut bus = GameBoyBus::new();
    for addr in [0x8000u16, 0x9FFF, 0xC000, 0xDFFF, 0xFE00, 0xFE9F, 0xFF10, 0xFF80, 0xFFFE, 0xFFFF] {
        bus.write8(addr, 0x5A);
        assert_eq!(bus.read8(addr), 0x5A, "addr 0x{addr:04X}");
    }
}

#[test]
fn bus_unmapped_reads_ff_and_drops_writes() {
    let mut bus = GameBoyBus::new();
    bus.write8(0xC000, 0x11);
    bus.write8(0xE000, 0x22);
    assert_eq!(bus.read8(0xE000), 0xFF);
    assert_eq!(bus.read8(0xC000), 0x11);
    bus.write8(0xFEA0, 0x33);
    assert_eq!(bus.read8(0xFEA0), 0xFF);

    // No cartridge inserted.
    assert_eq!(bus.read8(0x0150), 0xFF);
    assert_eq!(bus.read8(0xA000), 0xFF);
}

#[test]
fn ly_is_read_only() {
    let mut bus = GameBoyBus::new();
    bus.write8(0xFF44, 0x42);
    assert_eq!(bus.read8(0xFF44), 0x00);
}

#[test]
fn interrupt_flag_upper_bits_read_set() {
    let mut bus = GameBoyBus::new();
    bus.write8(0xFF0F, 0x01);
    assert_eq!(bus.read8(0xFF0F), 0xE1);
    assert_eq!(bus.interrupt_flags(), InterruptFlags::VBLANK);
    bus.write8(0xFF0F, 0xFF);
    assert_eq!(bus.read8(0xFF0F), 0xFF);
    assert_eq!(bus.interrupt_flags(), InterruptFlags::all());
}

#[test]
fn oam_dma_copies_source_page() {
    let mut bus = GameBoyBus::new();
    for i in 0..0xA0u16 {
        bus.write8(0xC000 + i, i as u8 ^ 0x3C);
    }
    bus.write8(0xFF46, 0xC0);
    assert_eq!(bus.read8(0xFF46), 0xC0);
    for i in 0..0xA0u16 {
        assert_eq!(bus.read8(0xFE00 + i), i as u8 ^ 0x3C);
    }
}

#[test]
fn tick_merges_timer_and_joypad_interrupts() {
    let mut bus = GameBoyBus::new();
    bus.write8(0xFF07, 0x05);
    bus.write8(0xFF06, 0x40);
    bus.write8(0xFF05, 0xFF);
    bus.tick(16);
    assert_eq!(bus.read8(0xFF05), 0x40);
    assert!(bus.interrupt_flags().contains(InterruptFlags::TIMER));

    bus.write8(0xFF00, 0x20);
    bus.joypad_mut().set_button(Button::Right, true);
    assert_eq!(bus.read8(0xFF00) & 0x0F, 0x0E);
    bus.tick(4);
    assert!(bus.interrupt_flags().contains(InterruptFlags::JOYPAD));
}

#[test]
fn tick_raises_vblank_into_if() {
    let mut bus = GameBoyBus::new();
    bus.write8(0xFF40, 0x91);
    bus.tick(144 * 456);
    assert_eq!(bus.read8(0xFF44), 144);
    assert_eq!(bus.read8(0xFF41) & 0x03, 1);
    assert!(bus.interrupt_flags().contains(InterruptFlags::VBLANK));
}

// --- GameBoy ---------------------------------------------------------------

#[test]
fn new_machine_is_in_post_boot_state() {
    let mut gb = GameBoy::new();
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert_eq!(gb.cpu.regs.af(), 0x01B0);
    assert!(!gb.bus().boot_rom_enabled());
    assert_eq!(gb.bus.read8(0xFF40), 0x91);
    assert_eq!(gb.bus.read8(0xFF47), 0xFC);
    assert!(gb.bus().ppu().lcd_enabled());
}

#[test]
fn boot_rom_overlays_until_disabled() {
    let mut gb = GameBoy::new();
    gb.load_rom(&cart_image(0x00, 0x00, 0x00, 2)).unwrap();
    let mut boot = vec![0u8; 256];
    boot[0] = 0x31;
    boot[0xFF] = 0xE0;
    gb.load_boot_rom(&boot).unwrap();

    assert_eq!(gb.cpu.regs.pc, 0x0000);
    assert_eq!(gb.cpu.regs.sp, 0xFFFE);
    assert!(!gb.bus().ppu().lcd_enabled());
    assert_eq!(gb.bus.read8(0x0000), 0x31);
    assert_eq!(gb.bus.read8(0x00FF), 0xE0);
    // The overlay stops at 0x00FF.
    assert_eq!(gb.bus.read8(0x0100), 0x00);

    gb.bus.write8(0xFF50, 0x01);
    assert!(!gb.bus().boot_rom_enabled());
    assert_eq!(gb.bus.read8(0x0000), 0x00);
    assert_eq!(gb.bus.read8(0x00FF), 0x00);

    // One-shot: later writes cannot re-enable it.
    gb.bus.write8(0xFF50, 0x00);
    assert_eq!(gb.bus.read8(0x0000), 0x00);
}

#[test]
fn wrong_size_boot_rom_changes_nothing() {
    let mut gb = GameBoy::new();
    assert!(gb.load_boot_rom(&[0u8; 255]).is_err());
    assert!(gb.load_boot_rom(&[0u8; 512]).is_err());
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert!(!gb.bus().boot_rom_enabled());
    assert!(gb.bus().ppu().lcd_enabled());
}

#[test]
fn step_frame_stops_at_vblank() {
    let mut gb = GameBoy::new();
    // JR -2
    gb.load_rom(&program_image(&[0x18, 0xFE])).unwrap();

    assert!(gb.step_frame());
    assert_eq!(gb.bus().ppu().ly(), 144);
    assert_eq!(gb.bus().ppu().mode(), PpuMode::VBlank);
    assert!(gb.bus().interrupt_flags().contains(InterruptFlags::VBLANK));
    assert_eq!(gb.cpu.regs.pc, 0x0100);

    assert!(gb.step_frame());
    assert_eq!(gb.bus().ppu().ly(), 144);
}

#[test]
fn step_frame_with_lcd_off_runs_cycle_budget() {
    let mut gb = GameBoy::new();
    // LD A,0 ; LDH (40),A ; JR -2
    gb.load_rom(&program_image(&[0x3E, 0x00, 0xE0, 0x40, 0x18, 0xFE]))
        .unwrap();
    assert!(gb.step_frame());
    assert!(!gb.bus().ppu().lcd_enabled());
    assert_eq!(gb.cpu.regs.pc, 0x0104);
}

#[test]
fn step_frame_reports_locked_cpu() {
    let mut gb = GameBoy::new();
    gb.load_rom(&program_image(&[0x00, 0xD3])).unwrap();
    assert!(!gb.step_frame());
    assert!(gb.is_locked());
    assert_eq!(gb.step(), 0);
    assert!(!gb.step_frame());
}

#[test]
fn vblank_interrupt_serviced_end_to_end() {
    let mut gb = GameBoy::new();
    // LD A,1 ; LDH (FF),A ; EI ; JR -2
    let mut rom = program_image(&[0x3E, 0x01, 0xE0, 0xFF, 0xFB, 0x18, 0xFE]);
    // VBlank handler: LD B,0x42 ; HALT
    rom[0x40] = 0x06;
    rom[0x41] = 0x42;
    rom[0x42] = 0x76;
    gb.load_rom(&rom).unwrap();

    gb.step_frame();
    for _ in 0..8 {
        gb.step();
    }
    assert_eq!(gb.cpu.regs.b, 0x42);
    assert!(!gb.bus().interrupt_flags().contains(InterruptFlags::VBLANK));
    assert!(!gb.cpu.ime);
}

#[test]
fn serial_writes_are_captured() {
    let mut gb = GameBoy::new();
    // LD A,'O' ; LDH (01),A ; LD A,0x81 ; LDH (02),A ; JR -2
    gb.load_rom(&program_image(&[
        0x3E, b'O', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, 0x18, 0xFE,
    ]))
    .unwrap();
    for _ in 0..5 {
        gb.step();
    }
    assert_eq!(gb.serial_output(), b"O");
    assert_eq!(gb.bus.read8(0xFF02), 0x7F);
}

#[test]
fn host_keys_map_to_buttons() {
    let mut gb = GameBoy::new();
    let mapping = [
        (Key::Right, Button::Right),
        (Key::Left, Button::Left),
        (Key::Up, Button::Up),
        (Key::Down, Button::Down),
        (Key::Z, Button::A),
        (Key::X, Button::B),
        (Key::A, Button::Select),
        (Key::S, Button::Start),
    ];
    for (key, button) in mapping {
        gb.handle_key(key, true);
        assert!(gb.bus_mut().joypad_mut().is_pressed(button), "{key:?}");
        gb.handle_key(key, false);
        assert!(!gb.bus_mut().joypad_mut().is_pressed(button), "{key:?}");
    }

    // Unmapped keys touch nothing.
    gb.handle_key(Key::Return, true);
    gb.bus.write8(0xFF00, 0x00);
    assert_eq!(gb.bus.read8(0xFF00) & 0x0F, 0x0F);
}

#[test]
fn save_data_only_for_battery_cartridges() {
    let mut gb = GameBoy::new();
    assert!(gb.save_data().is_none());
    assert!(gb.load_save_data(&[0u8; 8192]).is_err());

    gb.load_rom(&cart_image(0x01, 0x01, 0x02, 4)).unwrap();
    assert!(gb.save_data().is_none());

    gb.load_rom(&cart_image(0x03, 0x01, 0x02, 4)).unwrap();
    let mut save = vec![0u8; 8192];
    save[0] = 0x42;
    gb.load_save_data(&save).unwrap();
    assert_eq!(gb.save_data().map(|ram| ram[0]), Some(0x42));
    assert!(gb.load_save_data(&[0u8; 10]).is_err());

    gb.bus.write8(0x0000, 0x0A);
    gb.bus.write8(0xA001, 0x24);
    assert_eq!(gb.save_data().map(|ram| ram[1]), Some(0x24));
}
