//! Background renderer, composes one scanline of background and window pixels

use super::display::SCREEN_WIDTH;
use super::lcd::LCDControl;
use super::registers::PPURegisters;
use super::window::WindowRenderer;

/// VRAM starts at 0x8000; every address below is an index into that slice.
const VRAM_BASE: u16 = 0x8000;
/// Signed tile IDs are relative to 0x9000.
const SIGNED_TILE_BASE: isize = 0x1000;
const TILE_BYTES: usize = 16;

/// Output of one rendered scanline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine {
    pub shades: [u8; SCREEN_WIDTH],
    /// Whether any column of this line came from the window layer.
    pub window_used: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BackgroundRenderer;

impl BackgroundRenderer {
    /// Renders line `ly` from the register snapshot and VRAM (0x8000-0x9FFF).
    pub fn render_line(registers: &PPURegisters, ly: u8, window_line: u8, vram: &[u8]) -> ScanLine {
        let lcdc = LCDControl::new(registers.lcdc);
        let mut line = ScanLine {
            shades: [0; SCREEN_WIDTH],
            window_used: false,
        };

        for x in 0..SCREEN_WIDTH as u8 {
            let color_index = if WindowRenderer::covers(registers, ly, x) {
                line.window_used = true;
                let map_x = WindowRenderer::map_x(registers, x);
                Self::tile_color_index(vram, &lcdc, lcdc.window_tilemap(), map_x, window_line)
            } else if lcdc.bg_enable() {
                let map_x = x.wrapping_add(registers.scx);
                let map_y = ly.wrapping_add(registers.scy);
                Self::tile_color_index(vram, &lcdc, lcdc.bg_tilemap(), map_x, map_y)
            } else {
                // 背景關閉：直接輸出 0，不經調色盤
                continue;
            };
            line.shades[x as usize] = registers.bg_shade(color_index);
        }

        line
    }

    /// 2-bit color index of the pixel at (`map_x`, `map_y`) in a 256x256 tile map.
    pub(crate) fn tile_color_index(vram: &[u8], lcdc: &LCDControl, map_base: u16, map_x: u8, map_y: u8) -> u8 {
        let tile_col = (map_x / 8) as usize;
        let tile_row = (map_y / 8) as usize;
        let map_index = ((tile_row * 32 + tile_col) & 0x3FF) + map_base.wrapping_sub(VRAM_BASE) as usize;
        let tile_id = vram.get(map_index).copied().unwrap_or(0);

        let tile_addr = if lcdc.unsigned_tiledata() {
            tile_id as usize * TILE_BYTES
        } else {
            (SIGNED_TILE_BASE + (tile_id as i8 as isize) * TILE_BYTES as isize) as usize
        };

        let row_addr = tile_addr + (map_y % 8) as usize * 2;
        let low = vram.get(row_addr).copied().unwrap_or(0);
        let high = vram.get(row_addr + 1).copied().unwrap_or(0);

        let bit = 7 - (map_x % 8);
        (((high >> bit) & 1) << 1) | ((low >> bit) & 1)
    }
}
