//! 視窗圖層判斷與座標換算

use super::lcd::LCDControl;
use super::registers::PPURegisters;

#[derive(Debug, Default, Clone, Copy)]
pub struct WindowRenderer;

impl WindowRenderer {
    /// Left edge of the window in screen columns (WX - 7, may be negative).
    fn left_edge(registers: &PPURegisters) -> i16 {
        registers.wx as i16 - 7
    }

    /// Whether the window layer covers column `x` of line `ly`.
    pub fn covers(registers: &PPURegisters, ly: u8, x: u8) -> bool {
        LCDControl::new(registers.lcdc).window_enable()
            && ly >= registers.wy
            && x as i16 >= Self::left_edge(registers)
    }

    /// Column inside the window tile map for screen column `x`.
    pub fn map_x(registers: &PPURegisters, x: u8) -> u8 {
        (x as i16 - Self::left_edge(registers)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ppu::registers::LCDC_WINDOW_ENABLE;

    fn window_at(wx: u8, wy: u8) -> PPURegisters {
        PPURegisters {
            lcdc: LCDC_WINDOW_ENABLE,
            wx,
            wy,
            ..PPURegisters::new()
        }
    }

    #[test]
    fn covers_from_wx_minus_seven() {
        let registers = window_at(17, 10);
        assert!(!WindowRenderer::covers(&registers, 9, 50));
        assert!(!WindowRenderer::covers(&registers, 10, 9));
        assert!(WindowRenderer::covers(&registers, 10, 10));
        assert_eq!(WindowRenderer::map_x(&registers, 10), 0);
        assert_eq!(WindowRenderer::map_x(&registers, 25), 15);
    }

    #[test]
    fn small_wx_covers_whole_line() {
        let registers = window_at(0, 0);
        assert!(WindowRenderer::covers(&registers, 0, 0));
        assert_eq!(WindowRenderer::map_x(&registers, 0), 7);
    }

    #[test]
    fn disabled_window_never_covers() {
        let registers = PPURegisters {
            lcdc: 0,
            ..window_at(7, 0)
        };
        assert!(!WindowRenderer::covers(&registers, 100, 100));
    }
}
