// Game Boy Emulator 整合入口
// CPU 擁有 MMU，MMU 擁有 PPU

pub mod core;

// 重新導出主要結構
pub use self::core::GameBoy;
