/// PPU 和顯示相關配置
#[derive(Debug, Clone, PartialEq)]
pub struct VideoConfig {
    pub scale: u32,
    /// Shade 0-3 as 0xAARRGGBB, lightest first.
    pub palette: [u32; 4],
}

/// 經典 DMG 綠色色階
pub const DMG_GREEN: [u32; 4] = [0xFFE0F8D0, 0xFF88C070, 0xFF346856, 0xFF081820];

pub const GRAYSCALE: [u32; 4] = [0xFFFFFFFF, 0xFFAAAAAA, 0xFF555555, 0xFF000000];

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            scale: 4,
            palette: DMG_GREEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_goes_light_to_dark() {
        let config = VideoConfig::default();
        assert_eq!(config.scale, 4);
        let luma = |c: u32| ((c >> 16) & 0xFF) + ((c >> 8) & 0xFF) + (c & 0xFF);
        assert!(config.palette.windows(2).all(|w| luma(w[0]) > luma(w[1])));
    }
}
