use super::flags::{Flag, Flags};

/// CPU register file. 8-bit registers are stored directly; the 16-bit pairs
/// are derived from them on every access.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,    // 累加器 A
    flags: Flags, // 標誌寄存器 F
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16, // 堆疊指針
    pub pc: u16, // 程式計數器
}

impl Registers {
    /// Power-on state: every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// DMG state left behind by the boot ROM.
    pub fn post_boot() -> Self {
        let mut registers = Self::new();
        registers.set_af(0x01B0);
        registers.set_bc(0x0013);
        registers.set_de(0x00D8);
        registers.set_hl(0x014D);
        registers.sp = 0xFFFE;
        registers.pc = 0x0100;
        registers
    }

    pub fn get_f(&self) -> u8 {
        self.flags.value()
    }

    pub fn set_f(&mut self, value: u8) {
        self.flags.set_value(value);
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    // Flag operations
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.flags.get(flag)
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.set(flag, value);
    }

    pub fn get_zero(&self) -> bool {
        self.flags.get(Flag::Z)
    }

    pub fn set_zero(&mut self, value: bool) {
        self.flags.set(Flag::Z, value)
    }

    pub fn get_subtract(&self) -> bool {
        self.flags.get(Flag::N)
    }

    pub fn set_subtract(&mut self, value: bool) {
        self.flags.set(Flag::N, value)
    }

    pub fn get_half_carry(&self) -> bool {
        self.flags.get(Flag::H)
    }

    pub fn set_half_carry(&mut self, value: bool) {
        self.flags.set(Flag::H, value)
    }

    pub fn get_carry(&self) -> bool {
        self.flags.get(Flag::C)
    }

    pub fn set_carry(&mut self, value: bool) {
        self.flags.set(Flag::C, value)
    }

    pub fn update_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.flags.update_flags(z, n, h, c);
    }

    // 16位元寄存器操作
    pub fn get_af(&self) -> u16 {
        (self.a as u16) << 8 | (self.flags.value() as u16)
    }

    pub fn set_af(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        self.flags.set_value(value as u8); // 低4位始終為0
    }

    pub fn get_bc(&self) -> u16 {
        ((self.b as u16) << 8) | (self.c as u16)
    }

    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    pub fn get_de(&self) -> u16 {
        ((self.d as u16) << 8) | (self.e as u16)
    }

    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    pub fn get_hl(&self) -> u16 {
        ((self.h as u16) << 8) | (self.l as u16)
    }

    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }
}
