//! Interrupt sources. IE (0xFFFF) and IF (0xFF0F) are plain bus bytes; this
//! module only names their bits.

pub const INTERRUPT_FLAG_ADDR: u16 = 0xFF0F;
pub const INTERRUPT_ENABLE_ADDR: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub fn to_bit(&self) -> u8 {
        match self {
            Interrupt::VBlank => 0,
            Interrupt::LcdStat => 1,
            Interrupt::Timer => 2,
            Interrupt::Serial => 3,
            Interrupt::Joypad => 4,
        }
    }

    pub fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(Interrupt::VBlank),
            1 => Some(Interrupt::LcdStat),
            2 => Some(Interrupt::Timer),
            3 => Some(Interrupt::Serial),
            4 => Some(Interrupt::Joypad),
            _ => None,
        }
    }

    pub fn mask(&self) -> u8 {
        1 << self.to_bit()
    }

    /// 中斷向量位址
    pub fn vector(&self) -> u16 {
        0x0040 + 8 * self.to_bit() as u16
    }

    /// Sets this source's pending bit in an IF byte.
    pub fn request(&self, interrupt_flag: &mut u8) {
        *interrupt_flag |= self.mask();
    }

    /// Highest-priority source that is both enabled and pending.
    pub fn highest_priority(enable: u8, flag: u8) -> Option<Self> {
        let active = enable & flag & 0x1F;
        if active == 0 {
            return None;
        }
        // 優先順序：VBlank > LCD STAT > Timer > Serial > Joypad
        Interrupt::from_bit(active.trailing_zeros() as u8)
    }
}
