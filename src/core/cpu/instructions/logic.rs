use super::arithmetic::alu_cycles;
use super::cycles;
use super::register_utils::RegTarget;
use crate::core::cpu::flags::{check_carry_sub, check_half_carry_sub};
use crate::core::cpu::CPU;
use crate::core::cycles::CyclesType;
use crate::error::Result;

/// 處理邏輯運算指令族 (AND、XOR、OR、CP)
pub fn dispatch(cpu: &mut CPU, opcode: u8) -> Result<CyclesType> {
    let (value, cycles) = match opcode {
        0xA0..=0xBF => {
            let source = RegTarget::from_bits(opcode);
            (cpu.read_target(source), alu_cycles(source))
        }
        0xE6 | 0xEE | 0xF6 | 0xFE => (cpu.fetch_byte(), cycles::ALU_N),
        _ => return Err(super::invalid_opcode(cpu, opcode)),
    };

    // bits 3-4 pick the operation in both encodings
    match (opcode >> 3) & 0x03 {
        0 => cpu.and_a(value),
        1 => cpu.xor_a(value),
        2 => cpu.or_a(value),
        _ => cpu.cp_a(value),
    }
    Ok(cycles)
}

impl CPU {
    pub fn and_a(&mut self, value: u8) {
        self.registers.a &= value;
        self.update_logic_flags(true);
    }

    pub fn xor_a(&mut self, value: u8) {
        self.registers.a ^= value;
        self.update_logic_flags(false);
    }

    pub fn or_a(&mut self, value: u8) {
        self.registers.a |= value;
        self.update_logic_flags(false);
    }

    /// SUB without storing the result.
    pub fn cp_a(&mut self, value: u8) {
        let a = self.registers.a;
        self.registers.update_flags(
            a == value,
            true,
            check_half_carry_sub(a, value, false),
            check_carry_sub(a, value, false),
        );
    }

    fn update_logic_flags(&mut self, half_carry: bool) {
        let result = self.registers.a;
        self.registers.update_flags(result == 0, false, half_carry, false);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::cpu::tests::cpu_with_program;

    #[test]
    fn and_always_sets_half_carry() {
        // SCF; LD A,0xF0; AND 0x0F
        let mut cpu = cpu_with_program(&[0x37, 0x3E, 0xF0, 0xE6, 0x0F]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.registers.a, 0);
        assert_eq!(cpu.registers.get_f(), 0xA0);
    }

    #[test]
    fn xor_a_clears_accumulator() {
        // LD A,0x5A; XOR A
        let mut cpu = cpu_with_program(&[0x3E, 0x5A, 0xAF]);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 1);
        assert_eq!(cpu.registers.a, 0);
        assert_eq!(cpu.registers.get_f(), 0x80);
    }

    #[test]
    fn or_with_memory_operand() {
        // LD HL,0xC000; LD (HL),0x0F; LD A,0x30; OR (HL)
        let mut cpu = cpu_with_program(&[0x21, 0x00, 0xC0, 0x36, 0x0F, 0x3E, 0x30, 0xB6]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.step().unwrap(), 2);
        assert_eq!(cpu.registers.a, 0x3F);
        assert_eq!(cpu.registers.get_f(), 0);
    }

    #[test]
    fn cp_compares_without_storing() {
        // LD A,0x10; CP 0x20
        let mut cpu = cpu_with_program(&[0x3E, 0x10, 0xFE, 0x20]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.registers.a, 0x10);
        assert!(cpu.registers.get_carry());
        assert!(cpu.registers.get_subtract());
        assert!(!cpu.registers.get_zero());

        // LD A,0x42; LD C,0x42; CP C
        let mut cpu = cpu_with_program(&[0x3E, 0x42, 0x0E, 0x42, 0xB9]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.registers.get_f(), 0xC0);
    }
}
