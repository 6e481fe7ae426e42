//! PPU 暫存器定義

// PPU registers addresses
pub const LCDC: u16 = 0xFF40;
pub const STAT: u16 = 0xFF41;
pub const SCY: u16 = 0xFF42;
pub const SCX: u16 = 0xFF43;
pub const LY: u16 = 0xFF44;
pub const LYC: u16 = 0xFF45;
pub const DMA: u16 = 0xFF46;
pub const BGP: u16 = 0xFF47;
pub const OBP0: u16 = 0xFF48;
pub const OBP1: u16 = 0xFF49;
pub const WY: u16 = 0xFF4A;
pub const WX: u16 = 0xFF4B;

/// First and last address forwarded from the bus to the PPU.
pub const PPU_RESERVED_START: u16 = LCDC;
pub const PPU_RESERVED_END: u16 = WX;

// LCDC bits
pub const LCDC_DISPLAY_ENABLE: u8 = 1 << 7;
pub const LCDC_WINDOW_TILE_MAP: u8 = 1 << 6;
pub const LCDC_WINDOW_ENABLE: u8 = 1 << 5;
pub const LCDC_BG_TILE_DATA: u8 = 1 << 4;
pub const LCDC_BG_TILE_MAP: u8 = 1 << 3;
pub const LCDC_BG_ENABLE: u8 = 1 << 0;

// STAT bits
pub const STAT_LYC_INTERRUPT: u8 = 1 << 6;
pub const STAT_OAM_INTERRUPT: u8 = 1 << 5;
pub const STAT_VBLANK_INTERRUPT: u8 = 1 << 4;
pub const STAT_HBLANK_INTERRUPT: u8 = 1 << 3;
pub const STAT_LYC_EQUAL: u8 = 1 << 2;
pub const STAT_MODE_BITS: u8 = 0x03;
/// Bits 3-6: the only ones a write can change.
pub const STAT_ENABLE_BITS: u8 = 0x78;
pub const STAT_UNUSED_BIT: u8 = 1 << 7;

/// Latched register values. LY and the live STAT bits are owned by the timing
/// state machine, not stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PPURegisters {
    pub lcdc: u8,         // LCD Control
    pub stat_enables: u8, // STAT bits 3-6
    pub scy: u8,          // Scroll Y
    pub scx: u8,          // Scroll X
    pub lyc: u8,          // LY Compare
    pub dma: u8,          // DMA Transfer (latched only)
    pub bgp: u8,          // BG Palette Data
    pub obp0: u8,         // Object Palette 0 Data
    pub obp1: u8,         // Object Palette 1 Data
    pub wy: u8,           // Window Y Position
    pub wx: u8,           // Window X Position
}

impl PPURegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lcd_enabled(&self) -> bool {
        self.lcdc & LCDC_DISPLAY_ENABLE != 0
    }

    /// Maps a 2-bit color index through BGP to a shade 0-3.
    pub fn bg_shade(&self, color_index: u8) -> u8 {
        (self.bgp >> ((color_index & 0x03) * 2)) & 0x03
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_range_covers_lcd_registers() {
        for addr in [LCDC, STAT, SCY, SCX, LY, LYC, DMA, BGP, OBP0, OBP1, WY, WX] {
            assert!((PPU_RESERVED_START..=PPU_RESERVED_END).contains(&addr));
        }
    }

    #[test]
    fn bgp_maps_each_index() {
        let registers = PPURegisters {
            bgp: 0b11_10_01_00,
            ..PPURegisters::new()
        };
        for index in 0..4 {
            assert_eq!(registers.bg_shade(index), index);
        }

        let inverted = PPURegisters {
            bgp: 0b00_01_10_11,
            ..PPURegisters::new()
        };
        assert_eq!(inverted.bg_shade(0), 3);
        assert_eq!(inverted.bg_shade(3), 0);
    }
}
