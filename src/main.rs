// Game Boy 模擬器 - 主程式

use clap::Parser;
use dmg_core::config::{ConfigBuilder, LogLevel, SystemConfig, VideoConfig};
use dmg_core::core::cycles::CPU_CLOCK;
use dmg_core::interface::MinifbDisplay;
use dmg_core::interface::VideoInterface;
use dmg_core::utils::Logger;
use dmg_core::{GameBoy, Result};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

/// DMG Game Boy emulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the cartridge ROM
    #[arg(required = true)]
    rom: PathBuf,

    /// Boot ROM image; without one execution starts at 0x0100
    #[arg(long)]
    boot_rom: Option<PathBuf>,

    /// Window scale factor
    #[arg(long, default_value_t = 4)]
    scale: u32,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Write log lines to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ConfigBuilder::new()
        .video_config(VideoConfig {
            scale: args.scale,
            ..VideoConfig::default()
        })
        .system_config(SystemConfig {
            rom_path: args.rom,
            boot_rom_path: args.boot_rom,
            log_level: args.log_level,
            log_file: args.log_file,
        })
        .build();

    Logger::init(
        config.system.log_level.to_level_filter(),
        config.system.log_file.as_deref(),
    )?;
    info!("Game Boy 模擬器啟動中, CPU clock {} Hz", CPU_CLOCK);

    let cartridge = fs::read(&config.system.rom_path)?;
    info!(
        "ROM 載入成功: {} ({} bytes)",
        config.system.rom_path.display(),
        cartridge.len()
    );

    let mut gameboy = match &config.system.boot_rom_path {
        Some(path) => GameBoy::new(fs::read(path)?, cartridge),
        None => GameBoy::skip_boot(cartridge),
    };

    let mut display = MinifbDisplay::new("Game Boy", &config.video)?;
    let mut frames: u64 = 0;

    while display.is_open() {
        if let Err(e) = gameboy.run_frame() {
            error!("Emulation stopped after {} frames: {}", frames, e);
            return Err(e);
        }
        if gameboy.take_frame_ready() {
            display.present(gameboy.frame_buffer())?;
            frames += 1;
        } else {
            // LCD off: keep the window responsive
            display.update();
        }
    }

    info!("模擬器結束, 總幀數: {}", frames);
    Ok(())
}
