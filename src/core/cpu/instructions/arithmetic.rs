use super::cycles;
use super::register_utils::{RegPair, RegTarget};
use crate::core::cpu::flags::{
    check_carry_16_add, check_carry_add, check_carry_sub, check_half_carry_16_add,
    check_half_carry_add, check_half_carry_sub,
};
use crate::core::cpu::CPU;
use crate::core::cycles::CyclesType;
use crate::error::Result;

/// 處理算術指令族
pub fn dispatch(cpu: &mut CPU, opcode: u8) -> Result<CyclesType> {
    let cycles = match opcode {
        // ADD/ADC/SUB/SBC A, r
        0x80..=0x9F => {
            let source = RegTarget::from_bits(opcode);
            let value = cpu.read_target(source);
            let use_carry = opcode & 0x08 != 0;
            if opcode < 0x90 {
                cpu.add_a(value, use_carry);
            } else {
                cpu.sub_a(value, use_carry);
            }
            alu_cycles(source)
        }

        // ADD/ADC/SUB/SBC A, n
        0xC6 | 0xCE | 0xD6 | 0xDE => {
            let value = cpu.fetch_byte();
            let use_carry = opcode & 0x08 != 0;
            if opcode < 0xD0 {
                cpu.add_a(value, use_carry);
            } else {
                cpu.sub_a(value, use_carry);
            }
            cycles::ALU_N
        }

        // INC r / DEC r
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            cpu.inc_r(RegTarget::from_bits(opcode >> 3))
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            cpu.dec_r(RegTarget::from_bits(opcode >> 3))
        }

        // INC rr / DEC rr
        0x03 | 0x13 | 0x23 | 0x33 => cpu.inc_rr(RegPair::from_bits(opcode >> 4)),
        0x0B | 0x1B | 0x2B | 0x3B => cpu.dec_rr(RegPair::from_bits(opcode >> 4)),

        // ADD HL, rr
        0x09 | 0x19 | 0x29 | 0x39 => cpu.add_hl_rr(RegPair::from_bits(opcode >> 4)),

        0x27 => cpu.daa(),
        0x2F => cpu.cpl(),
        0x37 => cpu.scf(),
        0x3F => cpu.ccf(),

        // ADD SP, e
        0xE8 => cpu.add_sp_e(),

        _ => return Err(super::invalid_opcode(cpu, opcode)),
    };
    Ok(cycles)
}

/// Cost of an 8-bit ALU op against a register or (HL).
pub(crate) fn alu_cycles(source: RegTarget) -> CyclesType {
    if source.is_memory() {
        cycles::ALU_HL
    } else {
        cycles::ALU_R
    }
}

impl CPU {
    pub fn add_a(&mut self, value: u8, use_carry: bool) {
        let carry = use_carry && self.registers.get_carry();
        let a = self.registers.a;
        let result = a.wrapping_add(value).wrapping_add(carry as u8);

        self.registers.update_flags(
            result == 0,
            false,
            check_half_carry_add(a, value, carry),
            check_carry_add(a, value, carry),
        );
        self.registers.a = result;
    }

    pub fn sub_a(&mut self, value: u8, use_carry: bool) {
        let borrow = use_carry && self.registers.get_carry();
        let a = self.registers.a;
        let result = a.wrapping_sub(value).wrapping_sub(borrow as u8);

        self.registers.update_flags(
            result == 0,
            true,
            check_half_carry_sub(a, value, borrow),
            check_carry_sub(a, value, borrow),
        );
        self.registers.a = result;
    }

    pub fn inc_r(&mut self, target: RegTarget) -> CyclesType {
        let value = self.read_target(target);
        let result = value.wrapping_add(1);
        self.registers.set_zero(result == 0);
        self.registers.set_subtract(false);
        self.registers.set_half_carry((value & 0x0F) == 0x0F);
        self.write_target(target, result);
        if target.is_memory() {
            cycles::INC_HL
        } else {
            cycles::INC_R
        }
    }

    pub fn dec_r(&mut self, target: RegTarget) -> CyclesType {
        let value = self.read_target(target);
        let result = value.wrapping_sub(1);
        self.registers.set_zero(result == 0);
        self.registers.set_subtract(true);
        self.registers.set_half_carry((value & 0x0F) == 0x00);
        self.write_target(target, result);
        if target.is_memory() {
            cycles::INC_HL
        } else {
            cycles::INC_R
        }
    }

    pub fn inc_rr(&mut self, pair: RegPair) -> CyclesType {
        let value = self.read_pair(pair).wrapping_add(1);
        self.write_pair(pair, value);
        cycles::INC_RR
    }

    pub fn dec_rr(&mut self, pair: RegPair) -> CyclesType {
        let value = self.read_pair(pair).wrapping_sub(1);
        self.write_pair(pair, value);
        cycles::INC_RR
    }

    pub fn add_hl_rr(&mut self, pair: RegPair) -> CyclesType {
        let hl = self.registers.get_hl();
        let value = self.read_pair(pair);
        self.registers.set_subtract(false);
        self.registers
            .set_half_carry(check_half_carry_16_add(hl, value));
        self.registers.set_carry(check_carry_16_add(hl, value));
        self.registers.set_hl(hl.wrapping_add(value));
        cycles::ADD_HL_RR
    }

    pub fn add_sp_e(&mut self) -> CyclesType {
        let offset = self.fetch_byte();
        self.registers.sp = self.sp_plus_offset(offset);
        cycles::ADD_SP_E
    }

    /// 十進制調整 A
    pub fn daa(&mut self) -> CyclesType {
        let mut a = self.registers.a;
        let mut carry = self.registers.get_carry();
        let half_carry = self.registers.get_half_carry();

        if !self.registers.get_subtract() {
            if carry || a > 0x99 {
                a = a.wrapping_add(0x60);
                carry = true;
            }
            if half_carry || (a & 0x0F) > 0x09 {
                a = a.wrapping_add(0x06);
            }
        } else {
            if carry {
                a = a.wrapping_sub(0x60);
            }
            if half_carry {
                a = a.wrapping_sub(0x06);
            }
        }

        self.registers.set_zero(a == 0);
        self.registers.set_half_carry(false);
        self.registers.set_carry(carry);
        self.registers.a = a;
        cycles::NOP
    }

    pub fn cpl(&mut self) -> CyclesType {
        self.registers.a = !self.registers.a;
        self.registers.set_subtract(true);
        self.registers.set_half_carry(true);
        cycles::NOP
    }

    pub fn scf(&mut self) -> CyclesType {
        self.registers.set_subtract(false);
        self.registers.set_half_carry(false);
        self.registers.set_carry(true);
        cycles::NOP
    }

    pub fn ccf(&mut self) -> CyclesType {
        let carry = self.registers.get_carry();
        self.registers.set_subtract(false);
        self.registers.set_half_carry(false);
        self.registers.set_carry(!carry);
        cycles::NOP
    }
}
