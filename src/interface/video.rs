use crate::config::VideoConfig;
use crate::core::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::{Error, Result};
use minifb::{Key, Scale, Window, WindowOptions};
use std::fmt::{self, Debug};

/// Frame presentation sink. Receives 160x144 shade indices (0-3); color
/// conversion is the sink's job.
pub trait VideoInterface: Debug {
    fn present(&mut self, frame: &[u8]) -> Result<()>;
}

/// Maps shade indices through a 4-entry 0xAARRGGBB palette.
pub fn shades_to_argb(frame: &[u8], palette: &[u32; 4], out: &mut [u32]) {
    for (pixel, &shade) in out.iter_mut().zip(frame) {
        *pixel = palette[(shade & 0x03) as usize];
    }
}

pub struct MinifbDisplay {
    window: Window,
    palette: [u32; 4],
    buffer: Vec<u32>,
}

impl MinifbDisplay {
    pub fn new(title: &str, config: &VideoConfig) -> Result<Self> {
        let options = WindowOptions {
            scale: scale_for(config.scale),
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, SCREEN_WIDTH, SCREEN_HEIGHT, options)
            .map_err(|e| Error::Video(e.to_string()))?;
        window.set_target_fps(60);

        Ok(Self {
            window,
            palette: config.palette,
            buffer: vec![config.palette[0]; SCREEN_WIDTH * SCREEN_HEIGHT],
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Pumps window events without a new frame.
    pub fn update(&mut self) {
        self.window.update();
    }
}

fn scale_for(scale: u32) -> Scale {
    match scale {
        0 | 1 => Scale::X1,
        2 | 3 => Scale::X2,
        4..=7 => Scale::X4,
        _ => Scale::X8,
    }
}

impl Debug for MinifbDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinifbDisplay")
            .field("window", &"Window { ... }")
            .field("palette", &self.palette)
            .finish()
    }
}

impl VideoInterface for MinifbDisplay {
    fn present(&mut self, frame: &[u8]) -> Result<()> {
        shades_to_argb(frame, &self.palette, &mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, SCREEN_WIDTH, SCREEN_HEIGHT)
            .map_err(|e| Error::Video(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_lookup_per_shade() {
        let palette = [0xFFFFFFFF, 0xFFAAAAAA, 0xFF555555, 0xFF000000];
        let frame = [0u8, 1, 2, 3];
        let mut out = [0u32; 4];
        shades_to_argb(&frame, &palette, &mut out);
        assert_eq!(out, palette);
    }

    #[test]
    fn scale_rounds_down_to_supported_factor() {
        assert!(matches!(scale_for(1), Scale::X1));
        assert!(matches!(scale_for(3), Scale::X2));
        assert!(matches!(scale_for(4), Scale::X4));
        assert!(matches!(scale_for(16), Scale::X8));
    }
}
