// Game Boy (DMG) 模擬器核心庫
pub mod config;
pub mod core;
pub mod emulator;
pub mod error;
pub mod interface;
pub mod utils;

pub use crate::config::{Config, ConfigBuilder};
pub use crate::core::{RunState, CPU, MMU, PPU};
pub use crate::emulator::GameBoy;
pub use crate::error::{Error, Result};
