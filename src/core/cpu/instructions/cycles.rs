use crate::core::cycles::CyclesType;

// 指令特定週期 (machine cycles)
pub const NOP: CyclesType = 1;
pub const LD_R_R: CyclesType = 1;
pub const LD_R_N: CyclesType = 2;
pub const LD_R_HL: CyclesType = 2;
pub const LD_HL_N: CyclesType = 3;
pub const LD_A_RR: CyclesType = 2;
pub const LD_A_NN: CyclesType = 4;
pub const LDH_A_N: CyclesType = 3;
pub const LD_A_C: CyclesType = 2;
pub const LD_RR_NN: CyclesType = 3;
pub const LD_NN_SP: CyclesType = 5;
pub const LD_SP_HL: CyclesType = 2;
pub const LD_HL_SP_E: CyclesType = 3;

pub const ALU_R: CyclesType = 1;
pub const ALU_HL: CyclesType = 2;
pub const ALU_N: CyclesType = 2;
pub const INC_R: CyclesType = 1;
pub const INC_HL: CyclesType = 3;
pub const INC_RR: CyclesType = 2;
pub const ADD_HL_RR: CyclesType = 2;
pub const ADD_SP_E: CyclesType = 4;

pub const ROTATE_A: CyclesType = 1;
pub const CB_R: CyclesType = 2;
pub const CB_HL: CyclesType = 4;
pub const CB_BIT_HL: CyclesType = 3;

pub const JP_NN: CyclesType = 4;
pub const JP_NOT_TAKEN: CyclesType = 3;
pub const JP_HL: CyclesType = 1;
pub const JR: CyclesType = 3;
pub const JR_NOT_TAKEN: CyclesType = 2;
pub const CALL: CyclesType = 6;
pub const CALL_NOT_TAKEN: CyclesType = 3;
pub const RET: CyclesType = 4;
pub const RET_CC: CyclesType = 5;
pub const RET_NOT_TAKEN: CyclesType = 2;
pub const RST: CyclesType = 4;

pub const PUSH: CyclesType = 4;
pub const POP: CyclesType = 3;

/// Idle cost reported while halted or stopped.
pub const IDLE: CyclesType = 1;
pub const INTERRUPT_DISPATCH: CyclesType = 5;
