use std::io;
use thiserror::Error;

/// Game Boy 模擬器的錯誤類型
#[derive(Error, Debug)]
pub enum Error {
    /// CPU 指令錯誤
    #[error("Instruction error: {0}")]
    Instruction(#[from] InstructionError),

    /// 硬體連接錯誤
    #[error("Hardware error: {0}")]
    Hardware(#[from] HardwareError),

    /// IO 錯誤
    #[error("I/O error: {0}")]
    IO(#[from] io::Error),

    #[error("Video error: {0}")]
    Video(String),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionError {
    /// Opcode with no handler, fetched at the given address.
    #[error("Invalid opcode: {0:02X} at {1:04X}")]
    InvalidOpcode(u8, u16),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

/// 模擬器結果類型
pub type Result<T> = std::result::Result<T, Error>;
