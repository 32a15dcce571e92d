//! RV32I instruction decoder.
//!
//! Extracts opcodes, register indices, function codes, and the
//! sign-extended immediate for every RV32I instruction format (R, I, S, B,
//! U, J). This module only extracts fields; matching the extracted fields
//! against the ISA table and building an executable instruction happens in
//! [`crate::isa::table`] and [`crate::instr`].

use crate::isa::instruction::{Decoded, Format, InstructionBits};
use crate::isa::rv32i::opcodes;

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting the I-Type immediate field (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Bit shift for extracting the S-Type immediate low field (bits 7-11).
const S_IMM_LOW_SHIFT: u32 = 7;
/// Bit mask for the S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;
/// Bit shift for extracting the S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;
/// Bit mask for the S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;
/// Bit shift for combining the S-Type immediate fields.
const S_IMM_COMBINED_SHIFT: u32 = 5;
/// Width in bits of the S-Type immediate.
const S_IMM_BITS: u32 = 12;

/// Bit shift for extracting B-Type immediate bit 11 (bit 7 of instruction).
const B_IMM_11_SHIFT: u32 = 7;
/// Bit mask for B-Type immediate bit 11.
const B_IMM_11_MASK: u32 = 1;
/// Bit shift for extracting B-Type immediate bits 4-1 (bits 8-11).
const B_IMM_4_1_SHIFT: u32 = 8;
/// Bit mask for B-Type immediate bits 4-1.
const B_IMM_4_1_MASK: u32 = 0xF;
/// Bit shift for extracting B-Type immediate bits 10-5 (bits 25-30).
const B_IMM_10_5_SHIFT: u32 = 25;
/// Bit mask for B-Type immediate bits 10-5.
const B_IMM_10_5_MASK: u32 = 0x3F;
/// Bit shift for extracting B-Type immediate bit 12 (bit 31).
const B_IMM_12_SHIFT: u32 = 31;
/// Bit mask for B-Type immediate bit 12 (sign bit).
const B_IMM_12_MASK: u32 = 1;
/// Width in bits of the B-Type immediate (sign-extended).
const B_IMM_BITS: u32 = 13;
/// Bit position of bit 12 in the reconstructed B-Type immediate.
const B_IMM_12_POS: u32 = 12;
/// Bit position of bit 11 in the reconstructed B-Type immediate.
const B_IMM_11_POS: u32 = 11;
/// Bit position of bits 10-5 in the reconstructed B-Type immediate.
const B_IMM_10_5_POS: u32 = 5;
/// Bit position of bits 4-1 in the reconstructed B-Type immediate.
const B_IMM_4_1_POS: u32 = 1;

/// Bit mask for extracting the U-Type immediate field (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Bit shift for extracting J-Type immediate bits 19-12 (bits 12-19).
const J_IMM_19_12_SHIFT: u32 = 12;
/// Bit mask for J-Type immediate bits 19-12.
const J_IMM_19_12_MASK: u32 = 0xFF;
/// Bit shift for extracting J-Type immediate bit 11 (bit 20).
const J_IMM_11_SHIFT: u32 = 20;
/// Bit mask for J-Type immediate bit 11.
const J_IMM_11_MASK: u32 = 1;
/// Bit shift for extracting J-Type immediate bits 10-1 (bits 21-30).
const J_IMM_10_1_SHIFT: u32 = 21;
/// Bit mask for J-Type immediate bits 10-1.
const J_IMM_10_1_MASK: u32 = 0x3FF;
/// Bit shift for extracting J-Type immediate bit 20 (bit 31).
const J_IMM_20_SHIFT: u32 = 31;
/// Bit mask for J-Type immediate bit 20 (sign bit).
const J_IMM_20_MASK: u32 = 1;
/// Width in bits of the J-Type immediate (sign-extended).
const J_IMM_BITS: u32 = 21;
/// Bit position of bit 20 in the reconstructed J-Type immediate.
const J_IMM_20_POS: u32 = 20;
/// Bit position of bits 19-12 in the reconstructed J-Type immediate.
const J_IMM_19_12_POS: u32 = 12;
/// Bit position of bit 11 in the reconstructed J-Type immediate.
const J_IMM_11_POS: u32 = 11;
/// Bit position of bits 10-1 in the reconstructed J-Type immediate.
const J_IMM_10_1_POS: u32 = 1;

/// Extracts the opcode/register/function fields common to every format.
pub fn decode_fields(inst: u32) -> Decoded {
    Decoded {
        raw: inst,
        opcode: inst.opcode(),
        rd: InstructionBits::rd(&inst),
        rs1: InstructionBits::rs1(&inst),
        rs2: InstructionBits::rs2(&inst),
        funct3: InstructionBits::funct3(&inst),
        funct7: InstructionBits::funct7(&inst),
    }
}

/// Decodes the sign-extended (or, for U-type, pre-shifted) immediate value
/// for an instruction of the given format.
///
/// R-type instructions have no immediate and return 0.
pub fn decode_imm(inst: u32, format: Format) -> i32 {
    match format {
        Format::R => 0,
        Format::I => decode_i_type_imm(inst),
        Format::S => decode_s_type_imm(inst),
        Format::B => decode_b_type_imm(inst),
        Format::U => decode_u_type_imm(inst),
        Format::J => decode_j_type_imm(inst),
    }
}

/// Returns whether `opcode` belongs to the given instruction format's
/// default immediate shape, used by callers that only have the opcode and
/// not yet a resolved ISA table entry (e.g. the disassembler).
pub fn format_for_opcode(opcode: u32) -> Option<Format> {
    match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => Some(Format::I),
        opcodes::OP_STORE => Some(Format::S),
        opcodes::OP_BRANCH => Some(Format::B),
        opcodes::OP_LUI | opcodes::OP_AUIPC => Some(Format::U),
        opcodes::OP_JAL => Some(Format::J),
        opcodes::OP_REG => Some(Format::R),
        _ => None,
    }
}

/// Decodes the immediate value for I-Type instructions.
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`.
fn decode_i_type_imm(inst: u32) -> i32 {
    (inst as i32) >> I_IMM_SHIFT
}

/// Decodes the immediate value for S-Type instructions.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
fn decode_s_type_imm(inst: u32) -> i32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    let combined = (high << S_IMM_COMBINED_SHIFT) | low;
    sign_extend(combined, S_IMM_BITS)
}

/// Decodes the immediate value for B-Type instructions.
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
/// The immediate represents an even-aligned signed offset.
fn decode_b_type_imm(inst: u32) -> i32 {
    let bit_11 = (inst >> B_IMM_11_SHIFT) & B_IMM_11_MASK;
    let bits_4_1 = (inst >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
    let bits_10_5 = (inst >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
    let bit_12 = (inst >> B_IMM_12_SHIFT) & B_IMM_12_MASK;

    let combined = (bit_12 << B_IMM_12_POS)
        | (bit_11 << B_IMM_11_POS)
        | (bits_10_5 << B_IMM_10_5_POS)
        | (bits_4_1 << B_IMM_4_1_POS);
    sign_extend(combined, B_IMM_BITS)
}

/// Decodes the immediate value for U-Type instructions.
///
/// U-Type format: `imm[31:12] | rd | opcode`. Not sign-extended beyond the
/// natural sign bit already present in bit 31.
fn decode_u_type_imm(inst: u32) -> i32 {
    (inst & U_IMM_MASK) as i32
}

/// Decodes the immediate value for J-Type instructions.
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
/// The immediate represents an even-aligned signed offset.
fn decode_j_type_imm(inst: u32) -> i32 {
    let bits_19_12 = (inst >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK;
    let bit_11 = (inst >> J_IMM_11_SHIFT) & J_IMM_11_MASK;
    let bits_10_1 = (inst >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK;
    let bit_20 = (inst >> J_IMM_20_SHIFT) & J_IMM_20_MASK;

    let combined = (bit_20 << J_IMM_20_POS)
        | (bits_19_12 << J_IMM_19_12_POS)
        | (bit_11 << J_IMM_11_POS)
        | (bits_10_1 << J_IMM_10_1_POS);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign-extends a value of `bits` width to a 32-bit signed integer.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift) >> shift
}
