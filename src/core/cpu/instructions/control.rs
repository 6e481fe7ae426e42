use super::cycles;
use super::register_utils::RegPair;
use crate::core::cpu::{RunState, CPU};
use crate::core::cycles::CyclesType;
use crate::error::Result;
use log::debug;

/// 處理控制與堆疊指令
pub fn dispatch(cpu: &mut CPU, opcode: u8) -> Result<CyclesType> {
    let cycles = match opcode {
        // NOP
        0x00 => cycles::NOP,

        // STOP
        0x10 => cpu.stop(),

        // HALT
        0x76 => cpu.halt(),

        // DI / EI
        0xF3 => cpu.disable_interrupts(),
        0xFB => cpu.enable_interrupts(),

        // POP rr
        0xC1 | 0xD1 | 0xE1 | 0xF1 => cpu.pop_rr(RegPair::from_stack_bits(opcode >> 4)),

        // PUSH rr
        0xC5 | 0xD5 | 0xE5 | 0xF5 => cpu.push_rr(RegPair::from_stack_bits(opcode >> 4)),

        _ => return Err(super::invalid_opcode(cpu, opcode)),
    };
    Ok(cycles)
}

impl CPU {
    pub fn halt(&mut self) -> CyclesType {
        debug!("HALT at 0x{:04X}", self.registers.pc.wrapping_sub(1));
        self.run_state = RunState::Halted;
        cycles::NOP
    }

    /// STOP is followed by a padding byte that is skipped.
    pub fn stop(&mut self) -> CyclesType {
        let _padding = self.fetch_byte();
        debug!("STOP at 0x{:04X}", self.registers.pc.wrapping_sub(2));
        self.run_state = RunState::Stopped;
        cycles::NOP
    }

    pub fn disable_interrupts(&mut self) -> CyclesType {
        self.ime = false;
        self.ime_scheduled = false;
        cycles::NOP
    }

    /// IME turns on after the instruction that follows EI.
    pub fn enable_interrupts(&mut self) -> CyclesType {
        self.ime_scheduled = true;
        cycles::NOP
    }

    pub fn push_rr(&mut self, pair: RegPair) -> CyclesType {
        let value = self.read_pair(pair);
        self.push_word(value);
        cycles::PUSH
    }

    pub fn pop_rr(&mut self, pair: RegPair) -> CyclesType {
        let value = self.pop_word();
        self.write_pair(pair, value);
        cycles::POP
    }
}

#[cfg(test)]
mod tests {
    use crate::core::cpu::tests::cpu_with_program;
    use crate::core::cpu::RunState;

    #[test]
    fn push_bc_byte_order() {
        // LD SP,0xD000; LD BC,0x1234; PUSH BC
        let mut cpu = cpu_with_program(&[0x31, 0x00, 0xD0, 0x01, 0x34, 0x12, 0xC5]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 4);
        assert_eq!(cpu.registers.sp, 0xCFFE);
        assert_eq!(cpu.mmu.read_byte(0xCFFE), 0x34);
        assert_eq!(cpu.mmu.read_byte(0xCFFF), 0x12);
    }

    #[test]
    fn pop_af_masks_flags() {
        // LD SP,0xD000; LD BC,0x12FF; PUSH BC; POP AF
        let mut cpu = cpu_with_program(&[0x31, 0x00, 0xD0, 0x01, 0xFF, 0x12, 0xC5, 0xF1]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.registers.a, 0x12);
        assert_eq!(cpu.registers.get_f(), 0xF0);
        assert_eq!(cpu.registers.sp, 0xD000);
    }

    #[test]
    fn halt_stops_fetching() {
        // HALT; LD A,0x01
        let mut cpu = cpu_with_program(&[0x76, 0x3E, 0x01]);
        cpu.step().unwrap();
        assert_eq!(cpu.run_state(), RunState::Halted);
        assert_eq!(cpu.step().unwrap(), 1);
        assert_eq!(cpu.registers.pc, 1);
        assert_eq!(cpu.registers.a, 0);
    }

    #[test]
    fn stop_consumes_padding_byte() {
        let mut cpu = cpu_with_program(&[0x10, 0x00, 0x3E, 0x07]);
        cpu.step().unwrap();
        assert_eq!(cpu.run_state(), RunState::Stopped);
        assert_eq!(cpu.registers.pc, 2);
        cpu.resume();
        cpu.step().unwrap();
        assert_eq!(cpu.registers.a, 0x07);
    }

    #[test]
    fn ei_takes_effect_after_next_instruction() {
        // EI; NOP; NOP
        let mut cpu = cpu_with_program(&[0xFB, 0x00, 0x00]);
        cpu.step().unwrap();
        assert!(!cpu.ime());
        cpu.step().unwrap();
        assert!(cpu.ime());
    }

    #[test]
    fn di_cancels_pending_ei() {
        // EI; DI; NOP
        let mut cpu = cpu_with_program(&[0xFB, 0xF3, 0x00]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert!(!cpu.ime());
    }
}
