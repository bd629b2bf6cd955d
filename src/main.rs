use clap::Parser;
use dmgboy::board::Board;
use dmgboy::config::BoardConfig;
use dmgboy::memory::cartridge::Cartridge;
use dmgboy::video::palette::{Color, Palette};
use dmgboy::video::{SCREEN_HEIGHT, SCREEN_WIDTH};
use log::{info, LevelFilter};
use snafu::{whatever, ResultExt, Whatever};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Headless DMG emulator core")]
struct Args {
    /// Path to a .gb file or a .zip archive containing one
    rom: PathBuf,

    /// Number of frames to run
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Write the last frame as a PPM image
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Seed for the power-on RAM contents
    #[arg(long)]
    seed: Option<u64>,

    /// Battery RAM file, loaded before and written after the run
    #[arg(long)]
    save: Option<PathBuf>,
}

fn setup_logger(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message)))
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn load_rom(path: &Path) -> Result<Vec<u8>, Whatever> {
    let bytes = fs::read(path).with_whatever_context(|_| format!("Failed to read {}", path.display()))?;

    let is_zip = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("zip"));
    if !is_zip {
        return Ok(bytes);
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).whatever_context("Failed to open zip archive")?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).whatever_context("Failed to read zip entry")?;
        let name = entry.name().to_ascii_lowercase();
        if name.ends_with(".gb") || name.ends_with(".gbc") {
            info!("Loading {} from archive", entry.name());
            let mut rom = Vec::new();
            entry.read_to_end(&mut rom).whatever_context("Failed to decompress ROM")?;
            return Ok(rom);
        }
    }

    whatever!("No .gb or .gbc file in {}", path.display())
}

fn write_screenshot(path: &Path, frame: &[u8]) -> Result<(), Whatever> {
    let mut image = format!("P6\n{} {}\n255\n", SCREEN_WIDTH, SCREEN_HEIGHT).into_bytes();
    for &shade in frame {
        let color: Color = Palette::from_shade(shade).into();
        image.extend_from_slice(&color);
    }

    let mut file =
        fs::File::create(path).with_whatever_context(|_| format!("Failed to create {}", path.display()))?;
    file.write_all(&image)
        .with_whatever_context(|_| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[snafu::report]
fn main() -> Result<(), Whatever> {
    let args = Args::parse();
    setup_logger(args.log_level).whatever_context("Failed to set up logging")?;

    let rom = load_rom(&args.rom)?;
    let mut cartridge = Cartridge::from_bytes(rom).whatever_context("Failed to load cartridge")?;

    if let Some(save) = args.save.as_ref().filter(|save| save.exists()) {
        let ram = fs::read(save).with_whatever_context(|_| format!("Failed to read {}", save.display()))?;
        info!("Loaded {} bytes of battery RAM", ram.len());
        cartridge.mapper_mut().load_ram(ram);
    }

    let config = args.seed.map(BoardConfig::with_seed).unwrap_or_default();
    let mut board = Board::with_config(cartridge, config).whatever_context("Failed to power on")?;

    let mut frame = Vec::new();
    let mut stdout = std::io::stdout();
    for _ in 0..args.frames {
        frame = board.run_one_frame().whatever_context("Emulation stopped")?;

        let output = board.serial_mut().take_output();
        if !output.is_empty() {
            stdout.write_all(&output).whatever_context("Failed to write serial output")?;
            stdout.flush().whatever_context("Failed to write serial output")?;
        }
    }
    info!("Ran {} frames ({} machine cycles)", args.frames, board.cpu().cycles());

    if let Some(path) = &args.screenshot {
        write_screenshot(path, &frame)?;
    }

    if let Some(save) = &args.save {
        let ram = board.cartridge().mapper().dump_ram();
        if !ram.is_empty() {
            fs::write(save, ram).with_whatever_context(|_| format!("Failed to write {}", save.display()))?;
        }
    }

    Ok(())
}
