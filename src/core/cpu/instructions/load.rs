use super::cycles;
use super::register_utils::{RegPair, RegTarget};
use crate::core::cpu::flags::{check_carry_add, check_half_carry_add};
use crate::core::cpu::CPU;
use crate::core::cycles::CyclesType;
use crate::error::Result;

/// 處理 LD 指令族
pub fn dispatch(cpu: &mut CPU, opcode: u8) -> Result<CyclesType> {
    let cycles = match opcode {
        // LD rr, nn
        0x01 | 0x11 | 0x21 | 0x31 => cpu.ld_rr_nn(RegPair::from_bits(opcode >> 4)),

        // LD (BC), A / LD (DE), A
        0x02 => cpu.ld_addr_a(RegPair::BC),
        0x12 => cpu.ld_addr_a(RegPair::DE),

        // LD (HL+), A / LD (HL-), A
        0x22 => cpu.ld_hli_a(1),
        0x32 => cpu.ld_hli_a(-1),

        // LD A, (BC) / LD A, (DE)
        0x0A => cpu.ld_a_addr(RegPair::BC),
        0x1A => cpu.ld_a_addr(RegPair::DE),

        // LD A, (HL+) / LD A, (HL-)
        0x2A => cpu.ld_a_hli(1),
        0x3A => cpu.ld_a_hli(-1),

        // LD r, n / LD (HL), n
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            cpu.ld_r_n(RegTarget::from_bits(opcode >> 3))
        }

        // LD (nn), SP
        0x08 => cpu.ld_nn_sp(),

        // LD r, r' (0x76 is HALT)
        0x40..=0x75 | 0x77..=0x7F => {
            let target = RegTarget::from_bits(opcode >> 3);
            let source = RegTarget::from_bits(opcode);
            cpu.ld_r_r(target, source)
        }

        // LDH (n), A / LDH A, (n)
        0xE0 => cpu.ldh_n_a(),
        0xF0 => cpu.ldh_a_n(),

        // LD (C), A / LD A, (C)
        0xE2 => cpu.ld_c_a(),
        0xF2 => cpu.ld_a_c(),

        // LD (nn), A / LD A, (nn)
        0xEA => cpu.ld_nn_a(),
        0xFA => cpu.ld_a_nn(),

        // LD HL, SP+e / LD SP, HL
        0xF8 => cpu.ld_hl_sp_e(),
        0xF9 => cpu.ld_sp_hl(),

        _ => return Err(super::invalid_opcode(cpu, opcode)),
    };
    Ok(cycles)
}

impl CPU {
    pub fn ld_r_r(&mut self, target: RegTarget, source: RegTarget) -> CyclesType {
        // LD B,B and friends still cost a cycle even though nothing changes
        let value = self.read_target(source);
        self.write_target(target, value);
        if target.is_memory() || source.is_memory() {
            cycles::LD_R_HL
        } else {
            cycles::LD_R_R
        }
    }

    pub fn ld_r_n(&mut self, target: RegTarget) -> CyclesType {
        let value = self.fetch_byte();
        self.write_target(target, value);
        if target.is_memory() {
            cycles::LD_HL_N
        } else {
            cycles::LD_R_N
        }
    }

    pub fn ld_rr_nn(&mut self, pair: RegPair) -> CyclesType {
        let value = self.fetch_word();
        self.write_pair(pair, value);
        cycles::LD_RR_NN
    }

    pub fn ld_a_addr(&mut self, pair: RegPair) -> CyclesType {
        let addr = self.read_pair(pair);
        self.registers.a = self.read_byte(addr);
        cycles::LD_A_RR
    }

    pub fn ld_addr_a(&mut self, pair: RegPair) -> CyclesType {
        let addr = self.read_pair(pair);
        self.write_byte(addr, self.registers.a);
        cycles::LD_A_RR
    }

    /// LD (HL±), A
    pub fn ld_hli_a(&mut self, step: i16) -> CyclesType {
        let addr = self.registers.get_hl();
        self.write_byte(addr, self.registers.a);
        self.registers.set_hl(addr.wrapping_add_signed(step));
        cycles::LD_A_RR
    }

    /// LD A, (HL±)
    pub fn ld_a_hli(&mut self, step: i16) -> CyclesType {
        let addr = self.registers.get_hl();
        self.registers.a = self.read_byte(addr);
        self.registers.set_hl(addr.wrapping_add_signed(step));
        cycles::LD_A_RR
    }

    pub fn ld_nn_sp(&mut self) -> CyclesType {
        let addr = self.fetch_word();
        let sp = self.registers.sp;
        self.write_byte(addr, sp as u8);
        self.write_byte(addr.wrapping_add(1), (sp >> 8) as u8);
        cycles::LD_NN_SP
    }

    pub fn ldh_n_a(&mut self) -> CyclesType {
        let offset = self.fetch_byte();
        self.write_byte(0xFF00 | offset as u16, self.registers.a);
        cycles::LDH_A_N
    }

    pub fn ldh_a_n(&mut self) -> CyclesType {
        let offset = self.fetch_byte();
        self.registers.a = self.read_byte(0xFF00 | offset as u16);
        cycles::LDH_A_N
    }

    pub fn ld_c_a(&mut self) -> CyclesType {
        self.write_byte(0xFF00 | self.registers.c as u16, self.registers.a);
        cycles::LD_A_C
    }

    pub fn ld_a_c(&mut self) -> CyclesType {
        self.registers.a = self.read_byte(0xFF00 | self.registers.c as u16);
        cycles::LD_A_C
    }

    pub fn ld_nn_a(&mut self) -> CyclesType {
        let addr = self.fetch_word();
        self.write_byte(addr, self.registers.a);
        cycles::LD_A_NN
    }

    pub fn ld_a_nn(&mut self) -> CyclesType {
        let addr = self.fetch_word();
        self.registers.a = self.read_byte(addr);
        cycles::LD_A_NN
    }

    pub fn ld_hl_sp_e(&mut self) -> CyclesType {
        let offset = self.fetch_byte();
        let result = self.sp_plus_offset(offset);
        self.registers.set_hl(result);
        cycles::LD_HL_SP_E
    }

    pub fn ld_sp_hl(&mut self) -> CyclesType {
        self.registers.sp = self.registers.get_hl();
        cycles::LD_SP_HL
    }

    /// SP + signed offset. Z=0, N=0, H and C come from the unsigned low byte.
    pub(crate) fn sp_plus_offset(&mut self, offset: u8) -> u16 {
        let sp = self.registers.sp;
        let low = sp as u8;
        let half_carry = check_half_carry_add(low, offset, false);
        let carry = check_carry_add(low, offset, false);
        self.registers.update_flags(false, false, half_carry, carry);
        sp.wrapping_add_signed(offset as i8 as i16)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::cpu::tests::cpu_with_program;

    #[test]
    fn ld_r_r_copies_between_registers() {
        let mut cpu = cpu_with_program(&[0x06, 0x99, 0x48]); // LD B,0x99; LD C,B
        assert_eq!(cpu.step().unwrap(), 2);
        assert_eq!(cpu.step().unwrap(), 1);
        assert_eq!(cpu.registers.c, 0x99);
        assert_eq!(cpu.registers.pc, 3);
    }

    #[test]
    fn ld_hl_indirect_uses_bus() {
        // LD HL,0xC000; LD (HL),0x5A; LD A,(HL)
        let mut cpu = cpu_with_program(&[0x21, 0x00, 0xC0, 0x36, 0x5A, 0x7E]);
        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.mmu.read_byte(0xC000), 0x5A);
        assert_eq!(cpu.step().unwrap(), 2);
        assert_eq!(cpu.registers.a, 0x5A);
    }

    #[test]
    fn hl_increment_and_decrement_forms() {
        // LD HL,0xC010; LD A,0x11; LD (HL+),A; LD (HL-),A
        let mut cpu = cpu_with_program(&[0x21, 0x10, 0xC0, 0x3E, 0x11, 0x22, 0x32]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.registers.get_hl(), 0xC011);
        cpu.step().unwrap();
        assert_eq!(cpu.registers.get_hl(), 0xC010);
        assert_eq!(cpu.mmu.read_byte(0xC010), 0x11);
        assert_eq!(cpu.mmu.read_byte(0xC011), 0x11);
    }

    #[test]
    fn ldh_targets_high_page() {
        // LD A,0x77; LDH (0x80),A; LD A,0; LDH A,(0x80)
        let mut cpu = cpu_with_program(&[0x3E, 0x77, 0xE0, 0x80, 0x3E, 0x00, 0xF0, 0x80]);
        for _ in 0..4 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.mmu.read_byte(0xFF80), 0x77);
        assert_eq!(cpu.registers.a, 0x77);
    }

    #[test]
    fn ld_nn_sp_stores_little_endian() {
        // LD SP,0xBEEF; LD (0xC100),SP
        let mut cpu = cpu_with_program(&[0x31, 0xEF, 0xBE, 0x08, 0x00, 0xC1]);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 5);
        assert_eq!(cpu.mmu.read_byte(0xC100), 0xEF);
        assert_eq!(cpu.mmu.read_byte(0xC101), 0xBE);
    }

    #[test]
    fn ld_hl_sp_e_flags_from_low_byte() {
        // LD SP,0x00FF; LD HL,SP+1
        let mut cpu = cpu_with_program(&[0x31, 0xFF, 0x00, 0xF8, 0x01]);
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.registers.get_hl(), 0x0100);
        assert!(!cpu.registers.get_zero());
        assert!(!cpu.registers.get_subtract());
        assert!(cpu.registers.get_half_carry());
        assert!(cpu.registers.get_carry());

        // LD SP,0x1000; LD HL,SP-1
        let mut cpu = cpu_with_program(&[0x31, 0x00, 0x10, 0xF8, 0xFF]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.registers.get_hl(), 0x0FFF);
        assert!(!cpu.registers.get_half_carry());
        assert!(!cpu.registers.get_carry());
    }
}
