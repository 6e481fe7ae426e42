#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Z = 0x80, // Zero Flag (位元 7)
    N = 0x40, // Subtract Flag (位元 6)
    H = 0x20, // Half Carry Flag (位元 5)
    C = 0x10, // Carry Flag (位元 4)
}

/// The F register. The low nibble is always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub fn new(value: u8) -> Self {
        Flags(value & 0xF0)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn set_value(&mut self, value: u8) {
        self.0 = value & 0xF0; // 只保留高 4 位
    }

    // 基本標誌操作
    pub fn set(&mut self, flag: Flag, value: bool) {
        if value {
            self.0 |= flag as u8;
        } else {
            self.0 &= !(flag as u8);
        }
    }

    pub fn get(&self, flag: Flag) -> bool {
        (self.0 & flag as u8) != 0
    }

    pub fn update_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.set(Flag::Z, z);
        self.set(Flag::N, n);
        self.set(Flag::H, h);
        self.set(Flag::C, c);
    }

    /// 檢查條件標誌 (bits 3-4 of a conditional opcode)
    pub fn check_condition(&self, condition: u8) -> bool {
        match condition & 0x03 {
            0 => !self.get(Flag::Z), // NZ
            1 => self.get(Flag::Z),  // Z
            2 => !self.get(Flag::C), // NC
            _ => self.get(Flag::C),  // C
        }
    }
}

// 輔助函數

/// Carry out of bit 3 for `a + b + carry_in`.
pub fn check_half_carry_add(a: u8, b: u8, carry_in: bool) -> bool {
    (a & 0x0F) + (b & 0x0F) + carry_in as u8 > 0x0F
}

/// Borrow into bit 4 for `a - b - borrow_in`.
pub fn check_half_carry_sub(a: u8, b: u8, borrow_in: bool) -> bool {
    (a & 0x0F) < (b & 0x0F) + borrow_in as u8
}

pub fn check_carry_add(a: u8, b: u8, carry_in: bool) -> bool {
    a as u16 + b as u16 + carry_in as u16 > 0xFF
}

pub fn check_carry_sub(a: u8, b: u8, borrow_in: bool) -> bool {
    (a as u16) < b as u16 + borrow_in as u16
}

/// Carry out of bit 11.
pub fn check_half_carry_16_add(a: u16, b: u16) -> bool {
    (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF
}

pub fn check_carry_16_add(a: u16, b: u16) -> bool {
    a as u32 + b as u32 > 0xFFFF
}
