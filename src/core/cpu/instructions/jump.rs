use super::cycles;
use crate::core::cpu::CPU;
use crate::core::cycles::CyclesType;
use crate::error::Result;
use log::debug;

/// 處理跳躍、呼叫與返回指令
pub fn dispatch(cpu: &mut CPU, opcode: u8) -> Result<CyclesType> {
    let condition = (opcode >> 3) & 0x03;
    let cycles = match opcode {
        // JP nn / JP cc, nn / JP HL
        0xC3 => cpu.jp(None),
        0xC2 | 0xCA | 0xD2 | 0xDA => cpu.jp(Some(condition)),
        0xE9 => cpu.jp_hl(),

        // JR e / JR cc, e
        0x18 => cpu.jr(None),
        0x20 | 0x28 | 0x30 | 0x38 => cpu.jr(Some(condition)),

        // CALL nn / CALL cc, nn
        0xCD => cpu.call(None),
        0xC4 | 0xCC | 0xD4 | 0xDC => cpu.call(Some(condition)),

        // RET / RET cc / RETI
        0xC9 => cpu.ret(),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => cpu.ret_conditional(condition),
        0xD9 => cpu.reti(),

        // RST n
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            cpu.rst((opcode & 0x38) as u16)
        }

        _ => return Err(super::invalid_opcode(cpu, opcode)),
    };
    Ok(cycles)
}

impl CPU {
    fn condition_holds(&self, condition: Option<u8>) -> bool {
        condition.map_or(true, |cc| self.registers.flags().check_condition(cc))
    }

    pub fn jp(&mut self, condition: Option<u8>) -> CyclesType {
        let address = self.fetch_word();
        if self.condition_holds(condition) {
            self.registers.pc = address;
            cycles::JP_NN
        } else {
            cycles::JP_NOT_TAKEN
        }
    }

    pub fn jp_hl(&mut self) -> CyclesType {
        self.registers.pc = self.registers.get_hl();
        cycles::JP_HL
    }

    /// The displacement is relative to the address after the operand.
    pub fn jr(&mut self, condition: Option<u8>) -> CyclesType {
        let offset = self.fetch_byte() as i8;
        if self.condition_holds(condition) {
            self.registers.pc = self.registers.pc.wrapping_add_signed(offset as i16);
            cycles::JR
        } else {
            cycles::JR_NOT_TAKEN
        }
    }

    pub fn call(&mut self, condition: Option<u8>) -> CyclesType {
        let address = self.fetch_word();
        if self.condition_holds(condition) {
            self.push_word(self.registers.pc);
            self.registers.pc = address;
            cycles::CALL
        } else {
            cycles::CALL_NOT_TAKEN
        }
    }

    pub fn ret(&mut self) -> CyclesType {
        self.registers.pc = self.pop_word();
        cycles::RET
    }

    pub fn ret_conditional(&mut self, condition: u8) -> CyclesType {
        if self.registers.flags().check_condition(condition) {
            self.registers.pc = self.pop_word();
            cycles::RET_CC
        } else {
            cycles::RET_NOT_TAKEN
        }
    }

    pub fn reti(&mut self) -> CyclesType {
        self.registers.pc = self.pop_word();
        self.ime = true;
        debug!("RETI to 0x{:04X}, interrupts enabled", self.registers.pc);
        cycles::RET
    }

    pub fn rst(&mut self, vector: u16) -> CyclesType {
        self.push_word(self.registers.pc);
        self.registers.pc = vector;
        cycles::RST
    }
}

#[cfg(test)]
mod tests {
    use crate::core::cpu::tests::cpu_with_program;

    #[test]
    fn jr_backwards_and_forwards() {
        // JR +2; NOP; NOP; JR -4
        let mut cpu = cpu_with_program(&[0x18, 0x02, 0x00, 0x00, 0x18, 0xFC]);
        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.registers.pc, 4);
        cpu.step().unwrap();
        assert_eq!(cpu.registers.pc, 2);
        assert_eq!(cpu.registers.get_f(), 0);
    }

    #[test]
    fn jr_conditional_costs() {
        // XOR A; JR NZ,+5; JR Z,+1
        let mut cpu = cpu_with_program(&[0xAF, 0x20, 0x05, 0x28, 0x01]);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 2);
        assert_eq!(cpu.registers.pc, 3);
        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.registers.pc, 6);
    }

    #[test]
    fn jp_conditional_and_hl() {
        // SCF; JP NC,0x1234; JP C,0x0010
        let mut program = vec![0x37, 0xD2, 0x34, 0x12, 0xDA, 0x10, 0x00];
        program.resize(0x10, 0x00);
        // 0x0010: LD HL,0x0040; JP (HL)
        program.extend_from_slice(&[0x21, 0x40, 0x00, 0xE9]);
        let mut cpu = cpu_with_program(&program);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.registers.pc, 4);
        assert_eq!(cpu.step().unwrap(), 4);
        assert_eq!(cpu.registers.pc, 0x10);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 1);
        assert_eq!(cpu.registers.pc, 0x40);
    }

    #[test]
    fn call_then_ret_restores_pc_and_sp() {
        // LD SP,0xD000; CALL 0x0010; ... 0x0010: RET
        let mut program = vec![0x31, 0x00, 0xD0, 0xCD, 0x10, 0x00];
        program.resize(0x10, 0x00);
        program.push(0xC9);
        let mut cpu = cpu_with_program(&program);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 6);
        assert_eq!(cpu.registers.pc, 0x10);
        assert_eq!(cpu.registers.sp, 0xCFFE);
        assert_eq!(cpu.mmu.read_byte(0xCFFF), 0x00);
        assert_eq!(cpu.mmu.read_byte(0xCFFE), 0x06);
        assert_eq!(cpu.step().unwrap(), 4);
        assert_eq!(cpu.registers.pc, 0x06);
        assert_eq!(cpu.registers.sp, 0xD000);
    }

    #[test]
    fn ret_conditional_not_taken() {
        // XOR A; RET NZ
        let mut cpu = cpu_with_program(&[0xAF, 0xC0]);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 2);
        assert_eq!(cpu.registers.pc, 2);
    }

    #[test]
    fn rst_pushes_return_address() {
        // LD SP,0xD000; RST 0x28
        let mut cpu = cpu_with_program(&[0x31, 0x00, 0xD0, 0xEF]);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 4);
        assert_eq!(cpu.registers.pc, 0x28);
        assert_eq!(cpu.pop_word(), 0x0004);
    }

    #[test]
    fn reti_enables_interrupts_immediately() {
        // LD SP,0xD000; CALL 0x0010; ... 0x0010: RETI
        let mut program = vec![0x31, 0x00, 0xD0, 0xCD, 0x10, 0x00];
        program.resize(0x10, 0x00);
        program.push(0xD9);
        let mut cpu = cpu_with_program(&program);
        cpu.step().unwrap();
        cpu.step().unwrap();
        assert!(!cpu.ime());
        cpu.step().unwrap();
        assert!(cpu.ime());
        assert_eq!(cpu.registers.pc, 0x06);
    }
}
