use crate::core::cycles::CyclesType;
use crate::core::mmu::MMU;
use crate::core::ppu::registers::{BGP, LCDC};
use crate::error::Result;
use log::{debug, trace};

pub mod flags;
pub mod instructions;
pub mod interrupts;
pub mod registers;

use self::instructions::cycles;
use self::interrupts::Interrupt;
use self::registers::Registers;

/// CPU 執行狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Set by HALT; left when an enabled interrupt becomes pending.
    Halted,
    /// Set by STOP; only `CPU::resume` leaves it.
    Stopped,
}

#[derive(Debug)]
pub struct CPU {
    pub registers: Registers,
    pub mmu: MMU,
    run_state: RunState,
    ime: bool,
    ime_scheduled: bool,
    instruction_count: u64,
}

impl CPU {
    /// Power-on state: all registers zero, execution starts at 0x0000.
    pub fn new(mmu: MMU) -> Self {
        Self {
            registers: Registers::new(),
            mmu,
            run_state: RunState::Running,
            ime: false,
            ime_scheduled: false,
            instruction_count: 0,
        }
    }

    /// Puts the machine in the state the DMG boot ROM leaves behind.
    pub fn skip_boot(&mut self) {
        self.registers = Registers::post_boot();
        self.mmu.write_byte(BGP, 0xFC);
        self.mmu.write_byte(LCDC, 0x91);
        self.mmu.disable_boot_rom();
        self.run_state = RunState::Running;
        self.ime = false;
        self.ime_scheduled = false;
        debug!("Skipped boot ROM, PC=0x{:04X}", self.registers.pc);
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// External wake-up for a stopped (or halted) CPU.
    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
    }

    /// Interrupt master enable.
    pub fn ime(&self) -> bool {
        self.ime
    }

    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    /// 執行一條指令 (或服務一個中斷)，回傳消耗的 machine cycles
    pub fn step(&mut self) -> Result<CyclesType> {
        if let Some(cycles) = self.handle_interrupts() {
            return Ok(cycles);
        }

        if self.run_state != RunState::Running {
            return Ok(cycles::IDLE);
        }

        let pc = self.registers.pc;
        let opcode = self.fetch_byte();
        trace!("PC=0x{:04X} opcode=0x{:02X}", pc, opcode);

        self.instruction_count += 1;
        if self.instruction_count % 1_000_000 == 0 {
            debug!(
                "CPU Status: PC=0x{:04X}, Instruction Count: {}",
                pc, self.instruction_count
            );
        }

        let enable_after = self.ime_scheduled;
        let cycles = instructions::execute(self, opcode)?;

        // EI 延遲一條指令生效；中間若執行 DI 則取消
        if enable_after && self.ime_scheduled {
            self.ime = true;
            self.ime_scheduled = false;
        }

        Ok(cycles)
    }

    /// Wakes a halted CPU and, with IME set, jumps to the highest-priority
    /// pending vector.
    fn handle_interrupts(&mut self) -> Option<CyclesType> {
        let enable = self.mmu.interrupt_enable();
        let flag = self.mmu.interrupt_flag();
        let interrupt = Interrupt::highest_priority(enable, flag)?;

        if self.run_state == RunState::Halted {
            debug!("Leaving HALT for {:?}", interrupt);
            self.run_state = RunState::Running;
        }
        if self.run_state == RunState::Stopped || !self.ime {
            return None;
        }

        self.mmu.set_interrupt_flag(flag & !interrupt.mask());
        self.ime = false;
        self.push_word(self.registers.pc);
        self.registers.pc = interrupt.vector();
        debug!(
            "{:?} interrupt serviced, jumping to 0x{:04X}",
            interrupt, self.registers.pc
        );
        Some(cycles::INTERRUPT_DISPATCH)
    }

    // 其他輔助方法
    pub fn fetch_byte(&mut self) -> u8 {
        let byte = self.mmu.read_byte(self.registers.pc);
        self.registers.pc = self.registers.pc.wrapping_add(1);
        byte
    }

    pub fn fetch_word(&mut self) -> u16 {
        let low = self.fetch_byte() as u16;
        let high = self.fetch_byte() as u16;
        (high << 8) | low
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.mmu.read_byte(addr)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.mmu.write_byte(addr, value);
    }

    // Stack 操作：高位元組在較高位址
    pub fn push_word(&mut self, value: u16) {
        self.registers.sp = self.registers.sp.wrapping_sub(1);
        self.write_byte(self.registers.sp, (value >> 8) as u8);
        self.registers.sp = self.registers.sp.wrapping_sub(1);
        self.write_byte(self.registers.sp, value as u8);
    }

    pub fn pop_word(&mut self) -> u16 {
        let low = self.read_byte(self.registers.sp) as u16;
        self.registers.sp = self.registers.sp.wrapping_add(1);
        let high = self.read_byte(self.registers.sp) as u16;
        self.registers.sp = self.registers.sp.wrapping_add(1);
        (high << 8) | low
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::cpu::interrupts::{INTERRUPT_ENABLE_ADDR, INTERRUPT_FLAG_ADDR};

    /// CPU at power-on with `program` mapped as the cartridge from 0x0000.
    pub(crate) fn cpu_with_program(program: &[u8]) -> CPU {
        CPU::new(MMU::new(Vec::new(), program.to_vec()))
    }

    #[test]
    fn end_to_end_load_and_nops() {
        let mut cpu = cpu_with_program(&[0x3E, 0x42, 0x00, 0x00]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.registers.a, 0x42);
        assert_eq!(cpu.registers.pc, 4);
        assert_eq!(cpu.registers.get_f(), 0);
        assert_eq!(cpu.instruction_count(), 3);
    }

    #[test]
    fn push_pop_wraps_stack_pointer() {
        let mut cpu = cpu_with_program(&[]);
        cpu.registers.sp = 0x0001;
        cpu.push_word(0xBEEF);
        assert_eq!(cpu.registers.sp, 0xFFFF);
        assert_eq!(cpu.pop_word(), 0xBEEF);
        assert_eq!(cpu.registers.sp, 0x0001);
    }

    #[test]
    fn interrupt_is_serviced_before_fetch() {
        // EI; NOP; NOP
        let mut cpu = cpu_with_program(&[0xFB, 0x00, 0x00]);
        cpu.registers.sp = 0xD000;
        cpu.write_byte(INTERRUPT_ENABLE_ADDR, 0x01);
        cpu.write_byte(INTERRUPT_FLAG_ADDR, 0x01);

        cpu.step().unwrap(); // EI
        cpu.step().unwrap(); // NOP, IME now set
        assert_eq!(cpu.registers.pc, 2);

        assert_eq!(cpu.step().unwrap(), 5);
        assert_eq!(cpu.registers.pc, 0x0040);
        assert!(!cpu.ime());
        assert_eq!(cpu.read_byte(INTERRUPT_FLAG_ADDR) & 0x01, 0);
        assert_eq!(cpu.pop_word(), 0x0002);
    }

    #[test]
    fn interrupt_priority_takes_lowest_bit() {
        let mut cpu = cpu_with_program(&[0xFB, 0x00, 0x00]);
        cpu.registers.sp = 0xD000;
        cpu.write_byte(INTERRUPT_ENABLE_ADDR, 0x1F);
        cpu.write_byte(INTERRUPT_FLAG_ADDR, 0x06);
        cpu.step().unwrap();
        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.registers.pc, 0x0048);
        assert_eq!(cpu.read_byte(INTERRUPT_FLAG_ADDR) & 0x1F, 0x04);
    }

    #[test]
    fn halt_wakes_without_ime_and_continues() {
        // HALT; LD A,0x01
        let mut cpu = cpu_with_program(&[0x76, 0x3E, 0x01]);
        cpu.step().unwrap();
        assert_eq!(cpu.run_state(), RunState::Halted);
        assert_eq!(cpu.step().unwrap(), 1);

        cpu.write_byte(INTERRUPT_ENABLE_ADDR, 0x02);
        cpu.write_byte(INTERRUPT_FLAG_ADDR, 0x02);
        cpu.step().unwrap();
        assert_eq!(cpu.run_state(), RunState::Running);
        assert_eq!(cpu.registers.a, 0x01);
        // IME off: the flag stays pending
        assert_eq!(cpu.read_byte(INTERRUPT_FLAG_ADDR) & 0x02, 0x02);
    }

    #[test]
    fn stopped_cpu_ignores_interrupts() {
        let mut cpu = cpu_with_program(&[0x10, 0x00]);
        cpu.step().unwrap();
        cpu.write_byte(INTERRUPT_ENABLE_ADDR, 0x01);
        cpu.write_byte(INTERRUPT_FLAG_ADDR, 0x01);
        assert_eq!(cpu.step().unwrap(), 1);
        assert_eq!(cpu.run_state(), RunState::Stopped);
        assert_eq!(cpu.registers.pc, 2);
    }

    #[test]
    fn skip_boot_loads_post_boot_state() {
        let mut cpu = cpu_with_program(&[]);
        cpu.skip_boot();
        assert_eq!(cpu.registers, Registers::post_boot());
        assert_eq!(cpu.read_byte(LCDC), 0x91);
        assert_eq!(cpu.read_byte(BGP), 0xFC);
        assert!(!cpu.mmu.boot_rom_enabled());
    }
}
