//! Display module, holds the composed frame as shade indices 0-3

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;

#[derive(Debug, Clone)]
pub struct Display {
    framebuffer: Vec<u8>,
}

impl Display {
    pub fn new() -> Self {
        Self {
            framebuffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.framebuffer.fill(0);
    }

    pub fn get_frame(&self) -> &[u8] {
        &self.framebuffer
    }

    pub fn update_line(&mut self, line: usize, shades: &[u8; SCREEN_WIDTH]) {
        if line >= SCREEN_HEIGHT {
            return;
        }
        let start = line * SCREEN_WIDTH;
        self.framebuffer[start..start + SCREEN_WIDTH].copy_from_slice(shades);
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
