pub mod arithmetic;
pub mod bit;
pub mod control;
pub mod cycles;
pub mod jump;
pub mod load;
pub mod logic;
pub mod register_utils;

use crate::core::cpu::CPU;
use crate::core::cycles::CyclesType;
use crate::error::{Error, InstructionError, Result};

/// Base opcodes with no instruction behind them.
pub const ILLEGAL_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

/// CB 前綴
pub const CB_PREFIX: u8 = 0xCB;

pub fn is_illegal(opcode: u8) -> bool {
    ILLEGAL_OPCODES.contains(&opcode)
}

/// Error for an opcode that was just fetched (PC already points past it).
pub(crate) fn invalid_opcode(cpu: &CPU, opcode: u8) -> Error {
    Error::Instruction(InstructionError::InvalidOpcode(
        opcode,
        cpu.registers.pc.wrapping_sub(1),
    ))
}

/// 執行一條已取出的指令，回傳消耗的 machine cycles
pub fn execute(cpu: &mut CPU, opcode: u8) -> Result<CyclesType> {
    match opcode {
        // 控制指令
        0x00 | 0x10 | 0x76 | 0xF3 | 0xFB => control::dispatch(cpu, opcode),
        0xC1 | 0xD1 | 0xE1 | 0xF1 | 0xC5 | 0xD5 | 0xE5 | 0xF5 => control::dispatch(cpu, opcode),

        // LD 指令
        0x01 | 0x11 | 0x21 | 0x31 => load::dispatch(cpu, opcode), // LD rr,nn
        0x02 | 0x12 | 0x22 | 0x32 => load::dispatch(cpu, opcode), // LD (rr),A
        0x0A | 0x1A | 0x2A | 0x3A => load::dispatch(cpu, opcode), // LD A,(rr)
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => load::dispatch(cpu, opcode), // LD r,n
        0x08 => load::dispatch(cpu, opcode),                      // LD (nn),SP
        0x40..=0x75 | 0x77..=0x7F => load::dispatch(cpu, opcode), // LD r,r
        0xE0 | 0xF0 | 0xE2 | 0xF2 | 0xEA | 0xFA => load::dispatch(cpu, opcode),
        0xF8 | 0xF9 => load::dispatch(cpu, opcode), // LD HL,SP+e / LD SP,HL

        // 算術指令
        0x80..=0x9F | 0xC6 | 0xCE | 0xD6 | 0xDE => arithmetic::dispatch(cpu, opcode),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => arithmetic::dispatch(cpu, opcode), // INC r
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => arithmetic::dispatch(cpu, opcode), // DEC r
        0x03 | 0x13 | 0x23 | 0x33 | 0x0B | 0x1B | 0x2B | 0x3B => arithmetic::dispatch(cpu, opcode), // INC/DEC rr
        0x09 | 0x19 | 0x29 | 0x39 => arithmetic::dispatch(cpu, opcode), // ADD HL,rr
        0x27 | 0x2F | 0x37 | 0x3F | 0xE8 => arithmetic::dispatch(cpu, opcode),

        // 邏輯運算指令
        0xA0..=0xBF | 0xE6 | 0xEE | 0xF6 | 0xFE => logic::dispatch(cpu, opcode),

        // 位元指令
        0x07 | 0x0F | 0x17 | 0x1F => bit::dispatch_accumulator(cpu, opcode),
        CB_PREFIX => {
            let cb_opcode = cpu.fetch_byte();
            bit::dispatch(cpu, cb_opcode)
        }

        // 跳躍指令
        0x18 | 0x20 | 0x28 | 0x30 | 0x38 => jump::dispatch(cpu, opcode), // JR
        0xC2 | 0xC3 | 0xCA | 0xD2 | 0xDA | 0xE9 => jump::dispatch(cpu, opcode), // JP
        0xC4 | 0xCC | 0xCD | 0xD4 | 0xDC => jump::dispatch(cpu, opcode), // CALL
        0xC0 | 0xC8 | 0xC9 | 0xD0 | 0xD8 | 0xD9 => jump::dispatch(cpu, opcode), // RET/RETI
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => jump::dispatch(cpu, opcode), // RST

        // 非法操作碼
        _ => Err(invalid_opcode(cpu, opcode)),
    }
}
