//! LCD 控制器模組，管理 LCD 模式與 LCDC 位元

use super::registers::*;

pub const VISIBLE_LINES: u8 = 144;
pub const LAST_LINE: u8 = 153;
pub const DOTS_PER_LINE: u16 = 456;
pub const OAM_SCAN_END: u16 = 80; // dots 0..=79
pub const TRANSFER_END: u16 = 252; // dots 80..=251

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LCDMode {
    HBlank = 0,
    VBlank = 1,
    OAMScan = 2,
    Drawing = 3,
}

impl LCDMode {
    /// Mode as a pure function of the beam position.
    pub fn at(ly: u8, dot: u16, lcd_enabled: bool) -> Self {
        if !lcd_enabled {
            return LCDMode::HBlank;
        }
        if ly >= VISIBLE_LINES {
            LCDMode::VBlank
        } else if dot < OAM_SCAN_END {
            LCDMode::OAMScan
        } else if dot < TRANSFER_END {
            LCDMode::Drawing
        } else {
            LCDMode::HBlank
        }
    }

    /// STAT bit that enables an interrupt on entering this mode.
    pub fn stat_enable_bit(&self) -> Option<u8> {
        match self {
            LCDMode::HBlank => Some(STAT_HBLANK_INTERRUPT),
            LCDMode::VBlank => Some(STAT_VBLANK_INTERRUPT),
            LCDMode::OAMScan => Some(STAT_OAM_INTERRUPT),
            LCDMode::Drawing => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LCDControl(u8);

impl LCDControl {
    pub fn new(value: u8) -> Self {
        LCDControl(value)
    }

    pub fn display_enable(&self) -> bool {
        (self.0 & LCDC_DISPLAY_ENABLE) != 0
    }

    /// Window tile map base address.
    pub fn window_tilemap(&self) -> u16 {
        if (self.0 & LCDC_WINDOW_TILE_MAP) != 0 {
            0x9C00
        } else {
            0x9800
        }
    }

    pub fn window_enable(&self) -> bool {
        (self.0 & LCDC_WINDOW_ENABLE) != 0
    }

    /// True for 0x8000 unsigned addressing, false for 0x9000 signed.
    pub fn unsigned_tiledata(&self) -> bool {
        (self.0 & LCDC_BG_TILE_DATA) != 0
    }

    /// Background tile map base address.
    pub fn bg_tilemap(&self) -> u16 {
        if (self.0 & LCDC_BG_TILE_MAP) != 0 {
            0x9C00
        } else {
            0x9800
        }
    }

    pub fn bg_enable(&self) -> bool {
        (self.0 & LCDC_BG_ENABLE) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_windows_on_a_visible_line() {
        assert_eq!(LCDMode::at(0, 0, true), LCDMode::OAMScan);
        assert_eq!(LCDMode::at(0, 79, true), LCDMode::OAMScan);
        assert_eq!(LCDMode::at(0, 80, true), LCDMode::Drawing);
        assert_eq!(LCDMode::at(0, 251, true), LCDMode::Drawing);
        assert_eq!(LCDMode::at(0, 252, true), LCDMode::HBlank);
        assert_eq!(LCDMode::at(143, 455, true), LCDMode::HBlank);
    }

    #[test]
    fn vblank_lines_and_lcd_off() {
        assert_eq!(LCDMode::at(144, 0, true), LCDMode::VBlank);
        assert_eq!(LCDMode::at(153, 100, true), LCDMode::VBlank);
        assert_eq!(LCDMode::at(10, 100, false), LCDMode::HBlank);
    }

    #[test]
    fn lcdc_selects_maps_and_tile_data() {
        let lcdc = LCDControl::new(0x91);
        assert!(lcdc.display_enable());
        assert!(lcdc.bg_enable());
        assert!(lcdc.unsigned_tiledata());
        assert_eq!(lcdc.bg_tilemap(), 0x9800);
        assert_eq!(lcdc.window_tilemap(), 0x9800);
        assert!(!lcdc.window_enable());

        let lcdc = LCDControl::new(0x68);
        assert_eq!(lcdc.bg_tilemap(), 0x9C00);
        assert_eq!(lcdc.window_tilemap(), 0x9C00);
        assert!(lcdc.window_enable());
        assert!(!lcdc.unsigned_tiledata());
    }
}
