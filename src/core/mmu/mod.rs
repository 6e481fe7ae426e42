use crate::core::cpu::interrupts::{INTERRUPT_ENABLE_ADDR, INTERRUPT_FLAG_ADDR};
use crate::core::cycles::CyclesType;
use crate::core::ppu::PPU;
use crate::error::Result;
use log::{debug, info};

/// Boot ROM 關閉暫存器
pub const BOOT_ROM_DISABLE: u16 = 0xFF50;

const MEMORY_SIZE: usize = 0x10000;
const ROM_END: u16 = 0x7FFF;
const VRAM_START: usize = 0x8000;
/// First address after VRAM; the buffer is split here so the PPU can borrow
/// VRAM and IF at the same time.
const VRAM_END: usize = 0xA000;

/// Game Boy Memory Management Unit (MMU)
///
/// A flat 64KB buffer with the boot ROM and cartridge overlaid below 0x8000
/// and 0xFF40-0xFF4B delegated to the PPU, which the bus owns.
#[derive(Debug)]
pub struct MMU {
    memory: Vec<u8>,
    boot_rom: Vec<u8>,
    cartridge_rom: Vec<u8>,
    boot_rom_enabled: bool,
    ppu: PPU,
}

impl MMU {
    pub fn new(boot_rom: Vec<u8>, cartridge_rom: Vec<u8>) -> Self {
        if let Some(title) = cartridge_rom.get(0x134..0x144) {
            let title = String::from_utf8_lossy(title);
            info!(
                "Cartridge loaded - Size: {} bytes, Title: {}",
                cartridge_rom.len(),
                title.trim_end_matches('\0')
            );
        }
        debug!("Boot ROM size: {} bytes", boot_rom.len());

        Self {
            memory: vec![0; MEMORY_SIZE],
            boot_rom,
            cartridge_rom,
            boot_rom_enabled: true,
            ppu: PPU::new(),
        }
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        match address {
            _ if PPU::is_reserved_address(address) => self.ppu.read_register(address),
            0x0000..=ROM_END => self.read_rom(address),
            _ => self.memory[address as usize],
        }
    }

    fn read_rom(&self, address: u16) -> u8 {
        let offset = address as usize;
        if self.boot_rom_enabled {
            if let Some(&byte) = self.boot_rom.get(offset) {
                return byte;
            }
        }
        self.cartridge_rom.get(offset).copied().unwrap_or(0xFF)
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        match address {
            _ if PPU::is_reserved_address(address) => {
                let interrupt_flag = &mut self.memory[INTERRUPT_FLAG_ADDR as usize];
                self.ppu.write_register(address, value, interrupt_flag);
            }
            BOOT_ROM_DISABLE if self.boot_rom_enabled && value != 0 => self.disable_boot_rom(),
            // ROM area is read-only, no mapper
            0x0000..=ROM_END => {}
            _ => self.memory[address as usize] = value,
        }
    }

    /// Feeds `dots` PPU clocks with VRAM and IF borrowed from the buffer.
    pub fn step_ppu(&mut self, dots: CyclesType) -> Result<()> {
        let (low, high) = self.memory.split_at_mut(VRAM_END);
        let vram = &low[VRAM_START..];
        let interrupt_flag = &mut high[INTERRUPT_FLAG_ADDR as usize - VRAM_END];
        self.ppu.tick(dots, vram, interrupt_flag)
    }

    pub fn interrupt_enable(&self) -> u8 {
        self.read_byte(INTERRUPT_ENABLE_ADDR)
    }

    pub fn interrupt_flag(&self) -> u8 {
        self.read_byte(INTERRUPT_FLAG_ADDR)
    }

    pub fn set_interrupt_flag(&mut self, value: u8) {
        self.write_byte(INTERRUPT_FLAG_ADDR, value);
    }

    pub fn boot_rom_enabled(&self) -> bool {
        self.boot_rom_enabled
    }

    pub fn disable_boot_rom(&mut self) {
        if self.boot_rom_enabled {
            self.boot_rom_enabled = false;
            debug!("Boot ROM overlay disabled");
        }
    }

    pub fn vram(&self) -> &[u8] {
        &self.memory[VRAM_START..VRAM_END]
    }

    pub fn ppu(&self) -> &PPU {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut PPU {
        &mut self.ppu
    }
}
