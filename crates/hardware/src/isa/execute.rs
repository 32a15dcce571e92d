//! RV32I executor functions.
//!
//! Each function implements one instruction's semantics against its own
//! [`crate::instr::Instruction`]: it reads `rs1_v`/`rs2_v`/`imm_v`/`pc` and
//! writes `rd_v`, `new_pc`, and/or `memory_addr`. The ISA table
//! ([`crate::isa::table`]) pairs a raw-encoding match against one of these
//! function pointers, so dispatch is a single indirect call rather than the
//! reference implementation's member-function pointer.
//!
//! Register-register and register-immediate variants of the same ALU
//! operation (e.g. `add`/`addi`) share one executor: [`rhs`] picks the
//! second operand from `rs2_v` or `imm_v` depending on the instruction's
//! format, so `add` and `addi` both dispatch to [`exec_add`].

use crate::instr::Instruction;
use crate::isa::instruction::Format;

/// An executor function, called once per instruction during Execute.
pub type Executor = fn(&mut Instruction);

/// Returns the second ALU operand: the register value `rs2_v` for R-type
/// instructions, or the sign-extended immediate for every other format.
#[inline]
fn rhs(instr: &Instruction) -> u32 {
    match instr.format {
        Format::R => instr.rs2_v,
        _ => instr.imm_v as u32,
    }
}

/// Returns the shift amount: the low 5 bits of whichever operand `rhs`
/// would pick. Valid for both `sll`/`srl`/`sra` (from `rs2_v`) and
/// `slli`/`srli`/`srai` (from the immediate's low bits).
#[inline]
fn shamt(instr: &Instruction) -> u32 {
    rhs(instr) & 0x1F
}

/// `lui rd, imm`: rd = imm (already shifted into bits 31-12 by the decoder).
pub fn exec_lui(instr: &mut Instruction) {
    instr.rd_v = instr.imm_v as u32;
}

/// `auipc rd, imm`: rd = pc + imm.
pub fn exec_auipc(instr: &mut Instruction) {
    instr.rd_v = instr.pc.val().wrapping_add(instr.imm_v as u32);
}

/// `jal rd, imm`: rd = pc + 4, new_pc = pc + imm. Always taken.
pub fn exec_jal(instr: &mut Instruction) {
    instr.rd_v = instr.pc.val().wrapping_add(4);
    instr.new_pc = instr.pc.wrapping_add(instr.imm_v as u32);
}

/// `jalr rd, rs1, imm`: rd = pc + 4, new_pc = (rs1 + imm) & !1. Always taken.
pub fn exec_jalr(instr: &mut Instruction) {
    instr.rd_v = instr.pc.val().wrapping_add(4);
    let target = instr.rs1_v.wrapping_add(instr.imm_v as u32) & !1;
    instr.new_pc = target.into();
}

/// `beq rs1, rs2, imm`: branch if rs1 == rs2.
pub fn exec_beq(instr: &mut Instruction) {
    branch_if(instr, instr.rs1_v == instr.rs2_v);
}

/// `bne rs1, rs2, imm`: branch if rs1 != rs2.
pub fn exec_bne(instr: &mut Instruction) {
    branch_if(instr, instr.rs1_v != instr.rs2_v);
}

/// `blt rs1, rs2, imm`: branch if rs1 < rs2 (signed).
pub fn exec_blt(instr: &mut Instruction) {
    branch_if(instr, (instr.rs1_v as i32) < (instr.rs2_v as i32));
}

/// `bge rs1, rs2, imm`: branch if rs1 >= rs2 (signed).
pub fn exec_bge(instr: &mut Instruction) {
    branch_if(instr, (instr.rs1_v as i32) >= (instr.rs2_v as i32));
}

/// `bltu rs1, rs2, imm`: branch if rs1 < rs2 (unsigned).
pub fn exec_bltu(instr: &mut Instruction) {
    branch_if(instr, instr.rs1_v < instr.rs2_v);
}

/// `bgeu rs1, rs2, imm`: branch if rs1 >= rs2 (unsigned).
pub fn exec_bgeu(instr: &mut Instruction) {
    branch_if(instr, instr.rs1_v >= instr.rs2_v);
}

fn branch_if(instr: &mut Instruction, taken: bool) {
    if taken {
        instr.new_pc = instr.pc.wrapping_add(instr.imm_v as u32);
    }
}

/// `lb`/`lh`/`lw`/`lbu`/`lhu`: computes the effective address; the Memory
/// stage performs the access itself and applies sign/zero extension based
/// on the instruction's name.
pub fn exec_load(instr: &mut Instruction) {
    instr.memory_addr = instr.rs1_v.wrapping_add(instr.imm_v as u32).into();
}

/// `sb`/`sh`/`sw`: computes the effective address and stages the value to
/// store; the Memory stage performs the write.
pub fn exec_store(instr: &mut Instruction) {
    instr.memory_addr = instr.rs1_v.wrapping_add(instr.imm_v as u32).into();
}

/// `add`/`addi`: rd = rs1 + rhs.
pub fn exec_add(instr: &mut Instruction) {
    instr.rd_v = instr.rs1_v.wrapping_add(rhs(instr));
}

/// `sub`: rd = rs1 - rs2. R-type only; there is no `subi`.
pub fn exec_sub(instr: &mut Instruction) {
    instr.rd_v = instr.rs1_v.wrapping_sub(rhs(instr));
}

/// `sll`/`slli`: rd = rs1 << shamt.
pub fn exec_sll(instr: &mut Instruction) {
    instr.rd_v = instr.rs1_v.wrapping_shl(shamt(instr));
}

/// `slt`/`slti`: rd = (rs1 < rhs) ? 1 : 0, signed comparison.
pub fn exec_slt(instr: &mut Instruction) {
    instr.rd_v = u32::from((instr.rs1_v as i32) < (rhs(instr) as i32));
}

/// `sltu`/`sltiu`: rd = (rs1 < rhs) ? 1 : 0, unsigned comparison.
pub fn exec_sltu(instr: &mut Instruction) {
    instr.rd_v = u32::from(instr.rs1_v < rhs(instr));
}

/// `xor`/`xori`: rd = rs1 ^ rhs.
pub fn exec_xor(instr: &mut Instruction) {
    instr.rd_v = instr.rs1_v ^ rhs(instr);
}

/// `srl`/`srli`: rd = rs1 >> shamt, logical.
pub fn exec_srl(instr: &mut Instruction) {
    instr.rd_v = instr.rs1_v.wrapping_shr(shamt(instr));
}

/// `sra`/`srai`: rd = rs1 >> shamt, arithmetic (sign-preserving).
pub fn exec_sra(instr: &mut Instruction) {
    instr.rd_v = ((instr.rs1_v as i32).wrapping_shr(shamt(instr))) as u32;
}

/// `or`/`ori`: rd = rs1 | rhs.
pub fn exec_or(instr: &mut Instruction) {
    instr.rd_v = instr.rs1_v | rhs(instr);
}

/// `and`/`andi`: rd = rs1 & rhs.
pub fn exec_and(instr: &mut Instruction) {
    instr.rd_v = instr.rs1_v & rhs(instr);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::addr::Address;
    use crate::isa::instruction::Type;

    fn instr(format: Format) -> Instruction {
        Instruction {
            pc: Address::new(0x100),
            new_pc: Address::new(0x104),
            name: "test",
            format,
            itype: Type::Alu,
            rs1: 0,
            rs2: 0,
            rd: 0,
            rs1_v: 0,
            rs2_v: 0,
            rd_v: 0,
            imm_v: 0,
            memory_addr: Address::new(0),
            memory_size: 0,
            executor: exec_add,
            complete: false,
        }
    }

    #[test]
    fn add_uses_rs2_for_r_type() {
        let mut i = instr(Format::R);
        i.rs1_v = 5;
        i.rs2_v = 7;
        exec_add(&mut i);
        assert_eq!(i.rd_v, 12);
    }

    #[test]
    fn addi_uses_immediate_for_i_type() {
        let mut i = instr(Format::I);
        i.rs1_v = 5;
        i.imm_v = -3;
        exec_add(&mut i);
        assert_eq!(i.rd_v, 2);
    }

    #[test]
    fn branch_sets_new_pc_only_when_taken() {
        let mut i = instr(Format::B);
        i.rs1_v = 4;
        i.rs2_v = 4;
        i.imm_v = 8;
        exec_beq(&mut i);
        assert_eq!(i.new_pc, Address::new(0x108));

        let mut j = instr(Format::B);
        j.rs1_v = 4;
        j.rs2_v = 5;
        j.imm_v = 8;
        exec_beq(&mut j);
        assert_eq!(j.new_pc, Address::new(0x104));
    }

    #[test]
    fn jal_is_always_taken_and_links_return_address() {
        let mut i = instr(Format::J);
        i.imm_v = -108;
        exec_jal(&mut i);
        assert_eq!(i.rd_v, 0x104);
        assert_eq!(i.new_pc.val(), 0x100u32.wrapping_add((-108i32) as u32));
    }

    #[test]
    fn sra_preserves_sign() {
        let mut i = instr(Format::R);
        i.rs1_v = 0x8000_0000;
        i.rs2_v = 4;
        exec_sra(&mut i);
        assert_eq!(i.rd_v, 0xF800_0000);
    }
}
