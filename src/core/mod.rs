// Game Boy Emulator Core Components
pub mod cpu;
pub mod cycles;
pub mod mmu;
pub mod ppu;

pub use cpu::{RunState, CPU};
pub use mmu::MMU;
pub use ppu::PPU;
