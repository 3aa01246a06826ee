//! Headless host for the `dmgboy_gb` core.
//!
//! Everything the core leaves to its collaborators lives here: reading ROM,
//! boot ROM and save files, deriving the save path, driving frames through
//! the `App` interface and persisting battery-backed RAM on shutdown.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dmgboy_common::app::App;
use dmgboy_gb::{GameBoy, GameBoyApp};
use typed_builder::TypedBuilder;

/// Extension used for battery-backed RAM dumps.
const SAVE_EXTENSION: &str = "sav";

#[derive(Debug, Clone, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    #[builder(default)]
    pub boot_rom_path: Option<PathBuf>,
    /// Frames to run before shutting down.
    #[builder(default = 600)]
    pub frames: u64,
    #[builder(default = PathBuf::from("saves"), setter(into))]
    pub save_dir: PathBuf,
    /// Where to write the final framebuffer as raw RGBA bytes.
    #[builder(default)]
    pub frame_dump: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    /// The CPU hit an unimplemented opcode.
    pub stopped: bool,
    pub serial_output: Vec<u8>,
    /// Set when battery-backed RAM was written out.
    pub save_path: Option<PathBuf>,
}

/// `<save_dir>/<rom file stem>.sav`
pub fn save_path_for(save_dir: &Path, rom_path: &Path) -> PathBuf {
    let mut name = rom_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "cartridge".into());
    name.push(".");
    name.push(SAVE_EXTENSION);
    save_dir.join(name)
}

fn build_machine(config: &RunConfig) -> Result<GameBoy> {
    let rom = fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM {}", config.rom_path.display()))?;

    let mut gb = GameBoy::new();
    gb.load_rom(&rom)
        .with_context(|| format!("failed to load ROM {}", config.rom_path.display()))?;

    if let Some(boot_path) = &config.boot_rom_path {
        let boot = fs::read(boot_path)
            .with_context(|| format!("failed to read boot ROM {}", boot_path.display()))?;
        gb.load_boot_rom(&boot)
            .with_context(|| format!("failed to load boot ROM {}", boot_path.display()))?;
    }

    let battery = gb.cartridge().is_some_and(|cart| cart.battery());
    let save_path = save_path_for(&config.save_dir, &config.rom_path);
    if battery && save_path.exists() {
        let save = fs::read(&save_path)
            .with_context(|| format!("failed to read save {}", save_path.display()))?;
        gb.load_save_data(&save)
            .with_context(|| format!("failed to restore save {}", save_path.display()))?;
    }

    Ok(gb)
}

fn persist_save(gb: &GameBoy, config: &RunConfig) -> Result<Option<PathBuf>> {
    let Some(ram) = gb.save_data() else {
        return Ok(None);
    };
    fs::create_dir_all(&config.save_dir).with_context(|| {
        format!("failed to create save directory {}", config.save_dir.display())
    })?;
    let path = save_path_for(&config.save_dir, &config.rom_path);
    fs::write(&path, ram).with_context(|| format!("failed to write save {}", path.display()))?;
    log::info!("wrote {} bytes of cartridge RAM to {}", ram.len(), path.display());
    Ok(Some(path))
}

/// Load everything, run `config.frames` frames and shut down cleanly.
pub fn run(config: RunConfig) -> Result<RunSummary> {
    let gb = build_machine(&config)?;
    let mut app = GameBoyApp::new(gb);

    app.init();
    let mut screen = vec![0u8; app.screen_len()];
    while app.frames() < config.frames && !app.should_exit() {
        app.update(&mut screen);
    }
    app.exit();

    let save_path = persist_save(&app.gb, &config)?;

    if let Some(dump) = &config.frame_dump {
        fs::write(dump, &screen)
            .with_context(|| format!("failed to write frame dump {}", dump.display()))?;
    }

    Ok(RunSummary {
        frames: app.frames(),
        stopped: app.gb.is_locked(),
        serial_output: app.gb.serial_output().to_vec(),
        save_path,
    })
}

#[cfg(test)]
mod tests;
