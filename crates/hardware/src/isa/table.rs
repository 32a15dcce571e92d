//! The declaration-ordered ISA table.
//!
//! Each entry pairs a `(match, mask)` bit pattern with the format, semantic
//! type, memory access size, mnemonic, and executor for one instruction.
//! [`lookup`] scans the table in declaration order and returns the first
//! entry whose mask-and-compare succeeds — mirroring the reference
//! implementation's `find_entry`, which throws on no match instead of
//! returning `Option`.
//!
//! Entries are ordered exactly as in the original table, which matters for
//! one instruction: `srl`/`sra` are declared after every other R-type
//! entry. With precise per-entry masks (opcode, funct3, and — for R-type
//! and the immediate-shift instructions — funct7) no two entries can
//! actually double-match, so declaration order is no longer load-bearing
//! for correctness, but it is kept anyway to match the original table's
//! shape.

use crate::isa::execute::{self, Executor};
use crate::isa::instruction::{Format, Type};
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// One row of the ISA table.
#[derive(Clone, Copy)]
pub struct IsaEntry {
    /// Bits that must match after masking.
    pub match_bits: u32,
    /// Bits of the raw word this entry cares about.
    pub mask: u32,
    /// Instruction format (determines immediate decoding).
    pub format: Format,
    /// Instruction semantic category.
    pub itype: Type,
    /// Memory access size in bytes (0 if this instruction does not touch
    /// memory).
    pub memory_size: u32,
    /// Mnemonic, used for trace output.
    pub name: &'static str,
    /// Executor dispatched at Execute.
    pub executor: Executor,
}

impl IsaEntry {
    #[inline]
    fn matches(&self, raw: u32) -> bool {
        raw & self.mask == self.match_bits
    }
}

const OPCODE_ONLY: u32 = crate::isa::instruction::OPCODE_MASK;
const OPCODE_FUNCT3: u32 = crate::isa::instruction::OPCODE_MASK | (0x7 << 12);
const OPCODE_FUNCT3_FUNCT7: u32 = OPCODE_FUNCT3 | (0x7F << 25);

macro_rules! entry {
    ($match:expr, $mask:expr, $format:expr, $itype:expr, $size:expr, $name:expr, $exec:expr) => {
        IsaEntry {
            match_bits: $match,
            mask: $mask,
            format: $format,
            itype: $itype,
            memory_size: $size,
            name: $name,
            executor: $exec,
        }
    };
}

/// The full RV32I instruction table, in declaration order.
pub static ISA_TABLE: &[IsaEntry] = &[
    entry!(
        opcodes::OP_LUI,
        OPCODE_ONLY,
        Format::U,
        Type::Upper,
        0,
        "lui",
        execute::exec_lui
    ),
    entry!(
        opcodes::OP_AUIPC,
        OPCODE_ONLY,
        Format::U,
        Type::Upper,
        0,
        "auipc",
        execute::exec_auipc
    ),
    entry!(
        opcodes::OP_JAL,
        OPCODE_ONLY,
        Format::J,
        Type::Jump,
        0,
        "jal",
        execute::exec_jal
    ),
    entry!(
        // JALR has a single funct3 encoding (000).
        opcodes::OP_JALR,
        OPCODE_FUNCT3,
        Format::I,
        Type::Jump,
        0,
        "jalr",
        execute::exec_jalr
    ),
    entry!(
        opcodes::OP_BRANCH | (funct3::BEQ << 12),
        OPCODE_FUNCT3,
        Format::B,
        Type::Branch,
        0,
        "beq",
        execute::exec_beq
    ),
    entry!(
        opcodes::OP_BRANCH | (funct3::BNE << 12),
        OPCODE_FUNCT3,
        Format::B,
        Type::Branch,
        0,
        "bne",
        execute::exec_bne
    ),
    entry!(
        opcodes::OP_BRANCH | (funct3::BLT << 12),
        OPCODE_FUNCT3,
        Format::B,
        Type::Branch,
        0,
        "blt",
        execute::exec_blt
    ),
    entry!(
        opcodes::OP_BRANCH | (funct3::BGE << 12),
        OPCODE_FUNCT3,
        Format::B,
        Type::Branch,
        0,
        "bge",
        execute::exec_bge
    ),
    entry!(
        opcodes::OP_BRANCH | (funct3::BLTU << 12),
        OPCODE_FUNCT3,
        Format::B,
        Type::Branch,
        0,
        "bltu",
        execute::exec_bltu
    ),
    entry!(
        opcodes::OP_BRANCH | (funct3::BGEU << 12),
        OPCODE_FUNCT3,
        Format::B,
        Type::Branch,
        0,
        "bgeu",
        execute::exec_bgeu
    ),
    entry!(
        opcodes::OP_LOAD | (funct3::LB << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Load,
        1,
        "lb",
        execute::exec_load
    ),
    entry!(
        opcodes::OP_LOAD | (funct3::LH << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Load,
        2,
        "lh",
        execute::exec_load
    ),
    entry!(
        opcodes::OP_LOAD | (funct3::LW << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Load,
        4,
        "lw",
        execute::exec_load
    ),
    entry!(
        opcodes::OP_LOAD | (funct3::LBU << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Load,
        1,
        "lbu",
        execute::exec_load
    ),
    entry!(
        opcodes::OP_LOAD | (funct3::LHU << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Load,
        2,
        "lhu",
        execute::exec_load
    ),
    entry!(
        opcodes::OP_STORE | (funct3::SB << 12),
        OPCODE_FUNCT3,
        Format::S,
        Type::Store,
        1,
        "sb",
        execute::exec_store
    ),
    entry!(
        opcodes::OP_STORE | (funct3::SH << 12),
        OPCODE_FUNCT3,
        Format::S,
        Type::Store,
        2,
        "sh",
        execute::exec_store
    ),
    entry!(
        opcodes::OP_STORE | (funct3::SW << 12),
        OPCODE_FUNCT3,
        Format::S,
        Type::Store,
        4,
        "sw",
        execute::exec_store
    ),
    entry!(
        opcodes::OP_IMM | (funct3::ADD_SUB << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Alu,
        0,
        "addi",
        execute::exec_add
    ),
    entry!(
        opcodes::OP_IMM | (funct3::SLT << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Alu,
        0,
        "slti",
        execute::exec_slt
    ),
    entry!(
        opcodes::OP_IMM | (funct3::SLTU << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Alu,
        0,
        "sltiu",
        execute::exec_sltu
    ),
    entry!(
        opcodes::OP_IMM | (funct3::XOR << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Alu,
        0,
        "xori",
        execute::exec_xor
    ),
    entry!(
        opcodes::OP_IMM | (funct3::OR << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Alu,
        0,
        "ori",
        execute::exec_or
    ),
    entry!(
        opcodes::OP_IMM | (funct3::AND << 12),
        OPCODE_FUNCT3,
        Format::I,
        Type::Alu,
        0,
        "andi",
        execute::exec_and
    ),
    entry!(
        opcodes::OP_IMM | (funct3::SLL << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::I,
        Type::Alu,
        0,
        "slli",
        execute::exec_sll
    ),
    entry!(
        opcodes::OP_IMM | (funct3::SRL_SRA << 12) | (funct7::SRA << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::I,
        Type::Alu,
        0,
        "srai",
        execute::exec_sra
    ),
    entry!(
        opcodes::OP_IMM | (funct3::SRL_SRA << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::I,
        Type::Alu,
        0,
        "srli",
        execute::exec_srl
    ),
    entry!(
        opcodes::OP_REG | (funct3::ADD_SUB << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "add",
        execute::exec_add
    ),
    entry!(
        opcodes::OP_REG | (funct3::ADD_SUB << 12) | (funct7::SUB << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "sub",
        execute::exec_sub
    ),
    entry!(
        opcodes::OP_REG | (funct3::SLL << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "sll",
        execute::exec_sll
    ),
    entry!(
        opcodes::OP_REG | (funct3::SLT << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "slt",
        execute::exec_slt
    ),
    entry!(
        opcodes::OP_REG | (funct3::SLTU << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "sltu",
        execute::exec_sltu
    ),
    entry!(
        opcodes::OP_REG | (funct3::XOR << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "xor",
        execute::exec_xor
    ),
    entry!(
        opcodes::OP_REG | (funct3::OR << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "or",
        execute::exec_or
    ),
    entry!(
        opcodes::OP_REG | (funct3::AND << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "and",
        execute::exec_and
    ),
    entry!(
        opcodes::OP_REG | (funct3::SRL_SRA << 12) | (funct7::SRA << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "sra",
        execute::exec_sra
    ),
    // `srl` is format R, not I: declared last, after every overlapping
    // shift entry above, matching the original table's ordering.
    entry!(
        opcodes::OP_REG | (funct3::SRL_SRA << 12) | (funct7::DEFAULT << 25),
        OPCODE_FUNCT3_FUNCT7,
        Format::R,
        Type::Alu,
        0,
        "srl",
        execute::exec_srl
    ),
];

/// Scans the ISA table in declaration order and returns the first entry
/// whose mask-and-compare matches `raw`.
pub fn lookup(raw: u32) -> Option<&'static IsaEntry> {
    ISA_TABLE.iter().find(|entry| entry.matches(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addi_matches_op_imm_entry() {
        // addi x1, x0, -1
        let entry = lookup(0xFFF0_0093).unwrap();
        assert_eq!(entry.name, "addi");
        assert_eq!(entry.format, Format::I);
    }

    #[test]
    fn add_and_sub_share_opcode_and_funct3_but_not_funct7() {
        let add = lookup(0b0000000_00010_00001_000_10000_0110011).unwrap();
        assert_eq!(add.name, "add");
        let sub = lookup(0b0100000_00010_00001_000_10000_0110011).unwrap();
        assert_eq!(sub.name, "sub");
    }

    #[test]
    fn srl_and_srli_do_not_cross_match() {
        // srli x5, x5, 3 (OP_IMM, funct3=101, funct7=0000000)
        let srli = lookup(0x0032_D293).unwrap();
        assert_eq!(srli.name, "srli");
        // srl x5, x5, x3 (OP_REG, funct3=101, funct7=0000000)
        let srl = lookup(0x0032_D2B3).unwrap();
        assert_eq!(srl.name, "srl");
    }

    #[test]
    fn jalr_matches_single_funct3_encoding() {
        // jalr x0, 0(x1)
        let entry = lookup(0x0000_8067).unwrap();
        assert_eq!(entry.name, "jalr");
    }

    #[test]
    fn unmatched_encoding_returns_none() {
        assert!(lookup(0xFFFF_FFFF).is_none());
    }
}
