use super::cycles;
use super::register_utils::RegTarget;
use crate::core::cpu::CPU;
use crate::core::cycles::CyclesType;
use crate::error::Result;

/// Rotate/shift operation encoded in bits 3-5 of a CB opcode below 0x40.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

/// 處理 CB 前綴指令
pub fn dispatch(cpu: &mut CPU, cb_opcode: u8) -> Result<CyclesType> {
    let target = RegTarget::from_bits(cb_opcode);
    let bit = (cb_opcode >> 3) & 0x07;

    let cycles = match cb_opcode {
        // RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL r
        0x00..=0x3F => cpu.shift_r(ShiftOp::from_bits(bit), target),
        // BIT b, r
        0x40..=0x7F => cpu.bit_b_r(bit, target),
        // RES b, r
        0x80..=0xBF => cpu.res_b_r(bit, target),
        // SET b, r
        0xC0..=0xFF => cpu.set_b_r(bit, target),
    };
    Ok(cycles)
}

/// RLCA / RRCA / RLA / RRA
pub fn dispatch_accumulator(cpu: &mut CPU, opcode: u8) -> Result<CyclesType> {
    let op = match opcode {
        0x07 => ShiftOp::Rlc,
        0x0F => ShiftOp::Rrc,
        0x17 => ShiftOp::Rl,
        0x1F => ShiftOp::Rr,
        _ => return Err(super::invalid_opcode(cpu, opcode)),
    };
    let (result, carry) = cpu.apply_shift(op, cpu.registers.a);
    cpu.registers.a = result;
    // Z is always cleared for the accumulator forms
    cpu.registers.update_flags(false, false, false, carry);
    Ok(cycles::ROTATE_A)
}

fn cb_cycles(target: RegTarget) -> CyclesType {
    if target.is_memory() {
        cycles::CB_HL
    } else {
        cycles::CB_R
    }
}

impl CPU {
    /// Returns the shifted value and the bit shifted out.
    fn apply_shift(&self, op: ShiftOp, value: u8) -> (u8, bool) {
        let carry_in = self.registers.get_carry() as u8;
        match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        }
    }

    pub fn shift_r(&mut self, op: ShiftOp, target: RegTarget) -> CyclesType {
        let value = self.read_target(target);
        let (result, carry) = self.apply_shift(op, value);
        self.registers.update_flags(result == 0, false, false, carry);
        self.write_target(target, result);
        cb_cycles(target)
    }

    pub fn bit_b_r(&mut self, bit: u8, target: RegTarget) -> CyclesType {
        let value = self.read_target(target);
        self.registers.set_zero(value & (1 << bit) == 0);
        self.registers.set_subtract(false);
        self.registers.set_half_carry(true);
        if target.is_memory() {
            cycles::CB_BIT_HL
        } else {
            cycles::CB_R
        }
    }

    pub fn res_b_r(&mut self, bit: u8, target: RegTarget) -> CyclesType {
        let value = self.read_target(target);
        self.write_target(target, value & !(1 << bit));
        cb_cycles(target)
    }

    pub fn set_b_r(&mut self, bit: u8, target: RegTarget) -> CyclesType {
        let value = self.read_target(target);
        self.write_target(target, value | (1 << bit));
        cb_cycles(target)
    }
}
