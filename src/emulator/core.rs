/*
================================================================================
Game Boy 模擬器 - 核心模擬器實現
================================================================================
CPU 執行一條指令後，以 4 dots / machine cycle 推進 PPU
================================================================================
*/
use crate::core::cpu::CPU;
use crate::core::cycles::{CyclesType, DOTS_PER_CYCLE, MCYCLES_PER_FRAME};
use crate::core::mmu::MMU;
use crate::core::ppu::PPU;
use crate::error::Result;
use crate::interface::video::VideoInterface;
use log::debug;

#[derive(Debug)]
pub struct GameBoy {
    cpu: CPU,
    cycles: u64,
    /// Cycles run past the end of the previous frame.
    frame_overshoot: CyclesType,
}

impl GameBoy {
    /// Power-on session: execution starts at 0x0000 inside the boot ROM.
    pub fn new(boot_rom: Vec<u8>, cartridge_rom: Vec<u8>) -> Self {
        Self::from_cpu(CPU::new(MMU::new(boot_rom, cartridge_rom)))
    }

    /// Session without a boot ROM, starting at 0x0100 in post-boot state.
    pub fn skip_boot(cartridge_rom: Vec<u8>) -> Self {
        let mut gameboy = Self::new(Vec::new(), cartridge_rom);
        gameboy.cpu.skip_boot();
        gameboy
    }

    pub fn from_cpu(cpu: CPU) -> Self {
        Self {
            cpu,
            cycles: 0,
            frame_overshoot: 0,
        }
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    pub fn ppu(&self) -> &PPU {
        self.cpu.mmu.ppu()
    }

    pub fn total_cycles(&self) -> u64 {
        self.cycles
    }

    pub fn attach_video(&mut self, video: Box<dyn VideoInterface>) {
        self.cpu.mmu.ppu_mut().attach_video(video);
    }

    /// Executes one instruction and feeds the PPU the matching dots.
    pub fn step(&mut self) -> Result<CyclesType> {
        let cycles = self.cpu.step()?;
        self.cpu.mmu.step_ppu(cycles * DOTS_PER_CYCLE)?;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Runs one frame's worth of machine cycles (17,556), carrying any
    /// overshoot into the next frame.
    pub fn run_frame(&mut self) -> Result<()> {
        let mut elapsed = self.frame_overshoot;
        while elapsed < MCYCLES_PER_FRAME {
            elapsed += self.step()?;
        }
        self.frame_overshoot = elapsed - MCYCLES_PER_FRAME;
        debug!(
            "Frame done at PC=0x{:04X}, total cycles {}",
            self.cpu.registers.pc, self.cycles
        );
        Ok(())
    }

    /// Reads and clears the frame-ready signal.
    pub fn take_frame_ready(&mut self) -> bool {
        self.cpu.mmu.ppu_mut().take_frame_ready()
    }

    /// 160x144 shade indices (0-3).
    pub fn frame_buffer(&self) -> &[u8] {
        self.ppu().frame_buffer()
    }

    /// Presents the current frame to the attached video interface.
    pub fn present(&mut self) -> Result<()> {
        self.cpu.mmu.ppu_mut().present()
    }
}
