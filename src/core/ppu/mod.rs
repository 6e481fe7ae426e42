// PPU core module

pub mod background;
pub mod display;
pub mod lcd;
pub mod registers;
pub mod window;

pub use background::{BackgroundRenderer, ScanLine};
pub use display::{Display, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use lcd::{LCDControl, LCDMode};

use crate::core::cpu::interrupts::Interrupt;
use crate::core::cycles::CyclesType;
use crate::error::{HardwareError, Result};
use crate::interface::video::VideoInterface;
use lcd::{DOTS_PER_LINE, LAST_LINE, VISIBLE_LINES};
use log::{debug, trace};
use registers::*;

/// Dot-driven LCD timing state machine plus the frame it draws.
///
/// The PPU never sees the bus. Each tick receives VRAM (0x8000-0x9FFF) for
/// rendering and the IF byte (0xFF0F) for raising interrupts.
#[derive(Debug)]
pub struct PPU {
    registers: PPURegisters,
    display: Display,
    video: Option<Box<dyn VideoInterface>>,

    // PPU state
    ly: u8,
    dot: u16,
    /// Mode at the last tick, only used to detect transitions.
    mode: LCDMode,
    window_line: u8,
    coincidence: bool,
    frame_ready: bool,
    frame_count: u64,
}

impl PPU {
    pub fn new() -> Self {
        Self {
            registers: PPURegisters::new(),
            display: Display::new(),
            video: None,
            ly: 0,
            dot: 0,
            mode: LCDMode::HBlank,
            window_line: 0,
            // LY and LYC both start at 0
            coincidence: true,
            frame_ready: false,
            frame_count: 0,
        }
    }

    pub fn attach_video(&mut self, video: Box<dyn VideoInterface>) {
        self.video = Some(video);
    }

    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }

    /// Hands the current frame to the attached video sink.
    pub fn present(&mut self) -> Result<()> {
        let video = self
            .video
            .as_mut()
            .ok_or(HardwareError::MissingCollaborator("video interface"))?;
        video.present(self.display.get_frame())
    }

    pub fn is_reserved_address(address: u16) -> bool {
        (PPU_RESERVED_START..=PPU_RESERVED_END).contains(&address)
    }

    pub fn registers(&self) -> &PPURegisters {
        &self.registers
    }

    pub fn ly(&self) -> u8 {
        self.ly
    }

    pub fn dot(&self) -> u16 {
        self.dot
    }

    /// Current mode, derived from the beam position.
    pub fn mode(&self) -> LCDMode {
        LCDMode::at(self.ly, self.dot, self.registers.lcd_enabled())
    }

    pub fn window_line(&self) -> u8 {
        self.window_line
    }

    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    /// Reads and clears the frame-ready signal.
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// 160x144 shade indices (0-3), row-major.
    pub fn frame_buffer(&self) -> &[u8] {
        self.display.get_frame()
    }

    pub fn read_register(&self, address: u16) -> u8 {
        match address {
            LCDC => self.registers.lcdc,
            STAT => self.read_stat(),
            SCY => self.registers.scy,
            SCX => self.registers.scx,
            LY => self.ly,
            LYC => self.registers.lyc,
            DMA => self.registers.dma,
            BGP => self.registers.bgp,
            OBP0 => self.registers.obp0,
            OBP1 => self.registers.obp1,
            WY => self.registers.wy,
            WX => self.registers.wx,
            _ => 0xFF,
        }
    }

    fn read_stat(&self) -> u8 {
        let coincidence = if self.coincidence { STAT_LYC_EQUAL } else { 0 };
        STAT_UNUSED_BIT
            | (self.registers.stat_enables & STAT_ENABLE_BITS)
            | coincidence
            | (self.mode() as u8 & STAT_MODE_BITS)
    }

    pub fn write_register(&mut self, address: u16, value: u8, interrupt_flag: &mut u8) {
        match address {
            LCDC => self.write_lcdc(value, interrupt_flag),
            STAT => self.registers.stat_enables = value & STAT_ENABLE_BITS,
            SCY => self.registers.scy = value,
            SCX => self.registers.scx = value,
            LY => {
                self.ly = 0;
                self.update_coincidence(interrupt_flag);
            }
            LYC => {
                self.registers.lyc = value;
                self.update_coincidence(interrupt_flag);
            }
            DMA => self.registers.dma = value,
            BGP => self.registers.bgp = value,
            OBP0 => self.registers.obp0 = value,
            OBP1 => self.registers.obp1 = value,
            WY => self.registers.wy = value,
            WX => self.registers.wx = value,
            _ => {}
        }
    }

    fn write_lcdc(&mut self, value: u8, interrupt_flag: &mut u8) {
        let was_enabled = self.registers.lcd_enabled();
        self.registers.lcdc = value;
        let enabled = self.registers.lcd_enabled();

        if !was_enabled && enabled {
            // LCD 開啟：回到畫面起點
            self.ly = 0;
            self.dot = 0;
            self.window_line = 0;
            self.mode = LCDMode::OAMScan;
            self.update_coincidence(interrupt_flag);
            debug!("LCD on (LCDC=0x{:02X})", value);
        } else if was_enabled && !enabled {
            self.ly = 0;
            self.dot = 0;
            self.mode = LCDMode::HBlank;
            // STAT bit 2 tracks LY==LYC even while off; no IRQ from this edge
            self.coincidence = self.ly == self.registers.lyc;
            debug!("LCD off (LCDC=0x{:02X})", value);
        }
    }

    /// Recomputes LY==LYC and raises STAT on a rising edge when enabled.
    fn update_coincidence(&mut self, interrupt_flag: &mut u8) {
        let coincidence = self.ly == self.registers.lyc;
        if coincidence
            && !self.coincidence
            && self.registers.stat_enables & STAT_LYC_INTERRUPT != 0
        {
            Interrupt::LcdStat.request(interrupt_flag);
        }
        self.coincidence = coincidence;
    }

    /// Advances the beam by `dots`, firing mode-entry side effects.
    pub fn tick(&mut self, dots: CyclesType, vram: &[u8], interrupt_flag: &mut u8) -> Result<()> {
        if !self.registers.lcd_enabled() {
            return Ok(());
        }

        for _ in 0..dots {
            self.dot += 1;
            if self.dot == DOTS_PER_LINE {
                self.dot = 0;
                self.ly = if self.ly == LAST_LINE { 0 } else { self.ly + 1 };
                self.update_coincidence(interrupt_flag);
            }

            let mode = LCDMode::at(self.ly, self.dot, true);
            if mode != self.mode {
                self.mode = mode;
                self.enter_mode(mode, vram, interrupt_flag)?;
            }
        }
        Ok(())
    }

    fn enter_mode(&mut self, mode: LCDMode, vram: &[u8], interrupt_flag: &mut u8) -> Result<()> {
        if let Some(enable_bit) = mode.stat_enable_bit() {
            if self.registers.stat_enables & enable_bit != 0 {
                Interrupt::LcdStat.request(interrupt_flag);
            }
        }

        match mode {
            LCDMode::VBlank => {
                Interrupt::VBlank.request(interrupt_flag);
                self.frame_ready = true;
                self.frame_count += 1;
                self.window_line = 0;
                trace!("Frame {} complete", self.frame_count);
                if let Some(video) = self.video.as_mut() {
                    video.present(self.display.get_frame())?;
                }
            }
            LCDMode::Drawing if self.ly < VISIBLE_LINES => self.render_scanline(vram),
            _ => {}
        }
        Ok(())
    }

    /// Renders the current line into the frame and advances the window line counter.
    pub fn render_scanline(&mut self, vram: &[u8]) {
        let line = BackgroundRenderer::render_line(&self.registers, self.ly, self.window_line, vram);
        self.display.update_line(self.ly as usize, &line.shades);
        self.window_line = if line.window_used {
            self.window_line.wrapping_add(1)
        } else {
            0
        };
    }
}

impl Default for PPU {
    fn default() -> Self {
        Self::new()
    }
}
