use dmgboy_common::app::App;
use dmgboy_common::key::Key;

use crate::{GameBoy, SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Host-facing wrapper for the Game Boy machine.
///
/// Implements the shared `App` trait so a frontend (or the headless runner)
/// can drive the emulator one frame per `update`.
#[derive(Default)]
pub struct GameBoyApp {
    pub gb: GameBoy,
    should_exit: bool,
    frame_counter: u64,
}

impl GameBoyApp {
    pub fn new(gb: GameBoy) -> Self {
        Self {
            gb,
            should_exit: false,
            frame_counter: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame_counter
    }
}

impl App for GameBoyApp {
    fn init(&mut self) {
        match self.gb.cartridge() {
            Some(cart) => log::info!("Game Boy init: \"{}\"", cart.header().title()),
            None => log::info!("Game Boy init without cartridge"),
        }
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        if self.should_exit {
            return;
        }
        if !self.gb.step_frame() {
            log::error!(
                "CPU stopped after {} frames at pc=0x{:04X}",
                self.frame_counter,
                self.gb.cpu.regs.pc
            );
            self.should_exit = true;
        }
        self.frame_counter = self.frame_counter.wrapping_add(1);

        let frame = self.gb.framebuffer();
        let len = frame.len().min(screen_state.len());
        screen_state[..len].copy_from_slice(&frame[..len]);
    }

    fn handle_key_event(&mut self, key: Key, is_pressed: bool) {
        log::debug!("GB key event: {:?} pressed={}", key, is_pressed);
        if key == Key::Escape && is_pressed {
            self.should_exit = true;
            return;
        }
        self.gb.handle_key(key, is_pressed);
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.gb.is_locked()
    }

    fn exit(&mut self) {
        log::info!("Game Boy exit after {} frames", self.frame_counter);
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "dmgboy".to_string()
    }
}
