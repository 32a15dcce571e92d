//! The in-flight instruction object.
//!
//! An `Instruction` is the payload every stage register carries. It is
//! built once, at Decode-adjacent construction time in Fetch's companion
//! lookup, and then mutated in place as it moves through Execute, Memory,
//! and Writeback — mirroring the reference implementation's `Instruction`
//! class, but owned by value instead of allocated with `new`/`delete`.

use crate::common::addr::Address;
use crate::common::error::SimError;
use crate::isa::decode;
use crate::isa::execute::Executor;
use crate::isa::instruction::{Format, Type};
use crate::isa::table;

/// A decoded, and possibly partially executed, RV32I instruction.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Program counter this instruction was fetched from.
    pub pc: Address,
    /// The next program counter, as resolved by this instruction. Starts as
    /// `pc + 4` and is only changed by a taken branch or jump.
    pub new_pc: Address,
    /// Mnemonic, used for trace output and hazard-free diagnostics.
    pub name: &'static str,
    /// Instruction format (determines immediate layout).
    pub format: Format,
    /// Instruction semantic category.
    pub itype: Type,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Value read for `rs1` at Decode.
    pub rs1_v: u32,
    /// Value read for `rs2` at Decode.
    pub rs2_v: u32,
    /// Result value computed at Execute (or loaded at Memory, for loads).
    pub rd_v: u32,
    /// Sign-extended (or U-type pre-shifted) immediate.
    pub imm_v: i32,
    /// Effective memory address, computed at Execute for loads/stores.
    pub memory_addr: Address,
    /// Size in bytes of this instruction's memory access (0 if none).
    pub memory_size: u32,
    /// The function dispatched at Execute to compute this instruction's
    /// semantics.
    pub executor: Executor,
    /// Set once Execute has run this instruction's executor.
    pub complete: bool,
}

impl Instruction {
    /// Decodes a raw instruction word fetched from `pc`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DecodeFailure`] if no ISA table entry matches
    /// `raw`.
    pub fn decode(raw: u32, pc: Address) -> Result<Self, SimError> {
        let entry = table::lookup(raw).ok_or(SimError::DecodeFailure { pc, raw })?;
        let fields = decode::decode_fields(raw);
        let imm_v = decode::decode_imm(raw, entry.format);

        Ok(Self {
            pc,
            new_pc: pc.wrapping_add(4),
            name: entry.name,
            format: entry.format,
            itype: entry.itype,
            rs1: fields.rs1,
            rs2: fields.rs2,
            rd: fields.rd,
            rs1_v: 0,
            rs2_v: 0,
            rd_v: 0,
            imm_v,
            memory_addr: Address::new(0),
            memory_size: entry.memory_size,
            executor: entry.executor,
            complete: false,
        })
    }

    /// Returns a NOP-shaped bubble (decoded `addi x0, x0, 0`) used to fill an
    /// empty stage register in a trace-friendly way. Bubbles are never
    /// executed — the pipeline always checks for an empty stage register
    /// before dispatching a stage body — this exists purely so callers that
    /// want a default `Instruction` (e.g. tests) have a harmless one.
    #[allow(clippy::expect_used)] // the literal NOP encoding always matches the ISA table
    pub fn bubble() -> Self {
        Self::decode(0x0000_0013, Address::new(0)).expect("NOP always decodes")
    }

    /// Dispatches this instruction's executor, computing its result.
    pub fn execute(&mut self) {
        (self.executor)(self);
        self.complete = true;
    }

    /// Returns whether this instruction reads memory.
    pub fn is_load(&self) -> bool {
        matches!(self.itype, Type::Load)
    }

    /// Returns whether this instruction writes memory.
    pub fn is_store(&self) -> bool {
        matches!(self.itype, Type::Store)
    }

    /// Returns whether this instruction is an unconditional jump (JAL,
    /// JALR).
    pub fn is_jump(&self) -> bool {
        matches!(self.itype, Type::Jump)
    }

    /// Returns whether this instruction is a conditional branch.
    pub fn is_branch(&self) -> bool {
        matches!(self.itype, Type::Branch)
    }

    /// Returns whether control flow deviated from the sequential `pc + 4`
    /// the always-not-taken predictor assumed — a taken branch or any
    /// jump. Checked at Memory to decide whether to flush.
    pub fn mispredicted(&self) -> bool {
        self.new_pc.val() != self.pc.val().wrapping_add(4)
    }

    /// Returns whether this instruction has a real destination register.
    ///
    /// Branches and stores have no `rd` field in their encoding — the bits
    /// decode would read as `rd` are actually low immediate bits. Decode and
    /// Writeback both gate on this before touching the register file, so a
    /// branch or store never invalidates or writes back some unrelated
    /// register that happens to alias those bits.
    pub fn has_destination(&self) -> bool {
        self.rd != 0 && !matches!(self.itype, Type::Branch | Type::Store)
    }
}
