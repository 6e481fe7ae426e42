/// CPU 和其他硬體組件共用的時脈週期型別 (machine cycles)
pub type CyclesType = u32;

/// PPU dots fed per machine cycle.
pub const DOTS_PER_CYCLE: CyclesType = 4;

/// CPU 與 PPU 同步基準週期
pub const CPU_CLOCK: CyclesType = 4_194_304; // 4.194304 MHz
pub const PPU_LINE_DOTS: CyclesType = 456; // 掃描線週期數
pub const PPU_FRAME_DOTS: CyclesType = PPU_LINE_DOTS * 154; // 70_224
pub const MCYCLES_PER_FRAME: CyclesType = PPU_FRAME_DOTS / DOTS_PER_CYCLE; // 17_556
