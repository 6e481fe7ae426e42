//! Operand decoding shared by the instruction families.

use crate::core::cpu::CPU;

/// 8-bit operand selected by a 3-bit field. `HL` means the byte at (HL).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegTarget {
    B,
    C,
    D,
    E,
    H,
    L,
    HL,
    A,
}

impl RegTarget {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => RegTarget::B,
            1 => RegTarget::C,
            2 => RegTarget::D,
            3 => RegTarget::E,
            4 => RegTarget::H,
            5 => RegTarget::L,
            6 => RegTarget::HL,
            _ => RegTarget::A,
        }
    }

    /// 目標是否為記憶體 (HL)
    pub fn is_memory(&self) -> bool {
        matches!(self, RegTarget::HL)
    }
}

/// 16-bit operand selected by a 2-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegPair {
    BC,
    DE,
    HL,
    SP,
    AF,
}

impl RegPair {
    /// Encoding used by LD rr,nn / INC rr / DEC rr / ADD HL,rr.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::SP,
        }
    }

    /// Encoding used by PUSH/POP, where slot 3 is AF.
    pub fn from_stack_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::AF,
        }
    }
}

impl CPU {
    /// Reads an 8-bit operand, going through the bus for (HL).
    pub fn read_target(&mut self, target: RegTarget) -> u8 {
        match target {
            RegTarget::A => self.registers.a,
            RegTarget::B => self.registers.b,
            RegTarget::C => self.registers.c,
            RegTarget::D => self.registers.d,
            RegTarget::E => self.registers.e,
            RegTarget::H => self.registers.h,
            RegTarget::L => self.registers.l,
            RegTarget::HL => {
                let addr = self.registers.get_hl();
                self.read_byte(addr)
            }
        }
    }

    pub fn write_target(&mut self, target: RegTarget, value: u8) {
        match target {
            RegTarget::A => self.registers.a = value,
            RegTarget::B => self.registers.b = value,
            RegTarget::C => self.registers.c = value,
            RegTarget::D => self.registers.d = value,
            RegTarget::E => self.registers.e = value,
            RegTarget::H => self.registers.h = value,
            RegTarget::L => self.registers.l = value,
            RegTarget::HL => {
                let addr = self.registers.get_hl();
                self.write_byte(addr, value);
            }
        }
    }

    pub fn read_pair(&self, pair: RegPair) -> u16 {
        match pair {
            RegPair::BC => self.registers.get_bc(),
            RegPair::DE => self.registers.get_de(),
            RegPair::HL => self.registers.get_hl(),
            RegPair::SP => self.registers.sp,
            RegPair::AF => self.registers.get_af(),
        }
    }

    pub fn write_pair(&mut self, pair: RegPair, value: u16) {
        match pair {
            RegPair::BC => self.registers.set_bc(value),
            RegPair::DE => self.registers.set_de(value),
            RegPair::HL => self.registers.set_hl(value),
            RegPair::SP => self.registers.sp = value,
            RegPair::AF => self.registers.set_af(value),
        }
    }
}
