use std::fs;
use std::path::Path;

use super::{run, save_path_for, RunConfig};

const BANK: usize = 0x4000;

/// MBC1 + RAM + battery, 64 KiB ROM, 8 KiB RAM, `program` at 0x0100.
fn battery_rom(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 4 * BANK];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    rom[0x134..0x138].copy_from_slice(b"SAVE");
    rom[0x147] = 0x03;
    rom[0x148] = 0x01;
    rom[0x149] = 0x02;
    rom
}

/// JR -2
const SPIN: &[u8] = &[0x18, 0xFE];

#[test]
fn save_path_uses_rom_stem() {
    let path = save_path_for(Path::new("saves"), Path::new("roms/tetris.v1.gb"));
    assert_eq!(path, Path::new("saves").join("tetris.v1.sav"));
}

#[test]
fn runs_requested_frames_and_writes_save() {
    let dir = tempfile::tempdir().unwrap();
    let rom_path = dir.path().join("game.gb");
    fs::write(&rom_path, battery_rom(SPIN)).unwrap();
    let save_dir = dir.path().join("saves");

    let config = RunConfig::builder()
        .rom_path(&rom_path)
        .frames(3)
        .save_dir(&save_dir)
        .build();
    let summary = run(config).unwrap();

    assert_eq!(summary.frames, 3);
    assert!(!summary.stopped);
    let save_path = save_dir.join("game.sav");
    assert_eq!(summary.save_path.as_deref(), Some(save_path.as_path()));
    let save = fs::read(&save_path).unwrap();
    assert_eq!(save.len(), 8 * 1024);
}

#[test]
fn existing_save_is_restored_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let rom_path = dir.path().join("game.gb");
    // LD A,0x0A ; LD (0000),A ; LD A,(A000) ; LD (A001),A ; JR -2
    let program = [
        0x3E, 0x0A, 0xEA, 0x00, 0x00, 0xFA, 0x00, 0xA0, 0xEA, 0x01, 0xA0, 0x18, 0xFE,
    ];
    fs::write(&rom_path, battery_rom(&program)).unwrap();
    let save_dir = dir.path().join("saves");
    fs::create_dir_all(&save_dir).unwrap();
    let mut save = vec![0u8; 8 * 1024];
    save[0] = 0x5C;
    fs::write(save_dir.join("game.sav"), &save).unwrap();

    let config = RunConfig::builder()
        .rom_path(&rom_path)
        .frames(1)
        .save_dir(&save_dir)
        .build();
    run(config).unwrap();

    let saved = fs::read(save_dir.join("game.sav")).unwrap();
    assert_eq!(saved[0], 0x5C);
    assert_eq!(saved[1], 0x5C);
}

#[test]
fn mismatched_save_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let rom_path = dir.path().join("game.gb");
    fs::write(&rom_path, battery_rom(SPIN)).unwrap();
    fs::write(dir.path().join("game.sav"), [0u8; 16]).unwrap();

    let config = RunConfig::builder()
        .rom_path(&rom_path)
        .frames(1)
        .save_dir(dir.path())
        .build();
    let err = run(config).unwrap_err();
    assert!(format!("{err:#}").contains("game.sav"));
}

#[test]
fn missing_rom_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::builder()
        .rom_path(dir.path().join("absent.gb"))
        .save_dir(dir.path())
        .build();
    let err = run(config).unwrap_err();
    assert!(format!("{err:#}").contains("absent.gb"));
}

#[test]
fn wrong_size_boot_rom_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let rom_path = dir.path().join("game.gb");
    fs::write(&rom_path, battery_rom(SPIN)).unwrap();
    let boot_path = dir.path().join("boot.bin");
    fs::write(&boot_path, [0u8; 100]).unwrap();

    let config = RunConfig::builder()
        .rom_path(&rom_path)
        .boot_rom_path(Some(boot_path))
        .save_dir(dir.path())
        .build();
    assert!(run(config).is_err());
}

#[test]
fn locked_cpu_stops_early_and_dumps_frame() {
    let dir = tempfile::tempdir().unwrap();
    let rom_path = dir.path().join("crash.gb");
    let mut rom = vec![0u8; 2 * BANK];
    rom[0x100] = 0xDD;
    fs::write(&rom_path, rom).unwrap();
    let dump = dir.path().join("frame.rgba");

    let config = RunConfig::builder()
        .rom_path(&rom_path)
        .frames(10)
        .save_dir(dir.path().join("saves"))
        .frame_dump(Some(dump.clone()))
        .build();
    let summary = run(config).unwrap();

    assert_eq!(summary.frames, 1);
    assert!(summary.stopped);
    assert_eq!(summary.save_path, None);
    assert!(!dir.path().join("saves").exists());
    assert_eq!(fs::read(&dump).unwrap().len(), 160 * 144 * 4);
}

#[test]
fn unset_optional_paths_build_as_none() {
    let boot: Option<std::path::PathBuf> = None;
    let config = RunConfig::builder()
        .rom_path("game.gb")
        .boot_rom_path(boot)
        .frame_dump(None)
        .build();
    assert_eq!(config.boot_rom_path, None);
    assert_eq!(config.frame_dump, None);
    assert_eq!(config.frames, 600);
    assert_eq!(config.save_dir, Path::new("saves"));
}
