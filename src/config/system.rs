use clap::ValueEnum;
use log::LevelFilter;
use std::path::PathBuf;

/// System-related configuration
#[derive(Debug, Clone)]
pub struct SystemConfig {
    pub rom_path: PathBuf,
    /// None: start in post-boot state at 0x0100.
    pub boot_rom_path: Option<PathBuf>,
    pub log_level: LogLevel,
    /// None: log to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            rom_path: PathBuf::from("rom.gb"),
            boot_rom_path: None,
            log_level: LogLevel::Info,
            log_file: None,
        }
    }
}
