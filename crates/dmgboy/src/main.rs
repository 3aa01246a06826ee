use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use dmgboy::RunConfig;

/// Overrides the default save directory when `--save-dir` is absent.
const SAVE_DIR_ENV: &str = "DMGBOY_SAVE_DIR";

const USAGE: &str =
    "usage: dmgboy <rom> [--boot <path>] [--frames N] [--save-dir DIR] [--dump PATH]";

struct Args {
    rom: PathBuf,
    boot: Option<PathBuf>,
    frames: Option<u64>,
    save_dir: Option<PathBuf>,
    dump: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut rom = None;
    let mut boot = None;
    let mut frames = None;
    let mut save_dir = None;
    let mut dump = None;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .with_context(|| format!("{flag} needs a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--boot" => boot = Some(PathBuf::from(value("--boot")?)),
            "--frames" => {
                let raw = value("--frames")?;
                frames = Some(
                    raw.parse()
                        .with_context(|| format!("invalid frame count '{raw}'"))?,
                );
            }
            "--save-dir" => save_dir = Some(PathBuf::from(value("--save-dir")?)),
            "--dump" => dump = Some(PathBuf::from(value("--dump")?)),
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
            path => {
                if rom.is_some() {
                    bail!("more than one ROM path given\n{USAGE}");
                }
                rom = Some(PathBuf::from(path));
            }
        }
    }

    let Some(rom) = rom else {
        bail!("no ROM path provided\n{USAGE}");
    };
    Ok(Args {
        rom,
        boot,
        frames,
        save_dir,
        dump,
    })
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let save_dir = args
        .save_dir
        .or_else(|| std::env::var_os(SAVE_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("saves"));

    let config = RunConfig::builder()
        .rom_path(args.rom)
        .frames(args.frames.unwrap_or(600))
        .save_dir(save_dir)
        .boot_rom_path(args.boot)
        .frame_dump(args.dump)
        .build();

    log::info!("running '{}'", config.rom_path.display());
    let summary = dmgboy::run(config)?;

    println!(
        "ran {} frames{}",
        summary.frames,
        if summary.stopped { " (CPU stopped)" } else { "" }
    );
    if !summary.serial_output.is_empty() {
        println!("serial: {}", String::from_utf8_lossy(&summary.serial_output));
    }
    if let Some(path) = summary.save_path {
        println!("save written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
