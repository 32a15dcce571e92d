//! End-to-end: write a real ELF32 file to disk, load it through
//! [`rvsim_core::sim::Simulator`], and run it to completion — exercising
//! the loader, the engine, and `Simulator::run`'s step budget together,
//! the way the CLI actually uses them.

use std::io::Write;

use tempfile::NamedTempFile;

use rvsim_core::config::Config;
use rvsim_core::sim::Simulator;

/// Builds a minimal valid ELF32 RISC-V executable with one `PT_LOAD`
/// segment holding `payload`, entered at address 0.
fn minimal_elf(payload: &[u8]) -> Vec<u8> {
    const EHSIZE: u32 = 52;
    const PHSIZE: u32 = 32;
    let phoff = EHSIZE;
    let data_off = phoff + PHSIZE;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, 1, 1, 0]);
    bytes.extend_from_slice(&[0u8; 8]);
    bytes.extend_from_slice(&2u16.to_le_bytes()); // e_type = ET_EXEC
    bytes.extend_from_slice(&0xF3u16.to_le_bytes()); // e_machine = EM_RISCV
    bytes.extend_from_slice(&1u32.to_le_bytes()); // e_version
    bytes.extend_from_slice(&0u32.to_le_bytes()); // e_entry
    bytes.extend_from_slice(&phoff.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes()); // e_shoff
    bytes.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    bytes.extend_from_slice(&(EHSIZE as u16).to_le_bytes());
    bytes.extend_from_slice(&(PHSIZE as u16).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    assert_eq!(bytes.len() as u32, EHSIZE);

    bytes.extend_from_slice(&1u32.to_le_bytes()); // p_type = PT_LOAD
    bytes.extend_from_slice(&data_off.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes()); // p_vaddr
    bytes.extend_from_slice(&0u32.to_le_bytes()); // p_paddr
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&7u32.to_le_bytes()); // p_flags = RWX
    bytes.extend_from_slice(&4u32.to_le_bytes());
    assert_eq!(bytes.len() as u32, data_off);
    bytes.extend_from_slice(payload);
    bytes
}

#[test]
fn loaded_program_runs_to_a_correct_register_state() {
    // addi x1, x0, 42 ; addi x2, x0, 0 (padding so fetch never runs dry)
    let addi_42 = 0x02A0_0093u32;
    let nop = 0x0000_0013u32;
    let mut payload = Vec::new();
    payload.extend_from_slice(&addi_42.to_le_bytes());
    for _ in 0..16 {
        payload.extend_from_slice(&nop.to_le_bytes());
    }

    let mut file = NamedTempFile::new().expect("create temp elf file");
    file.write_all(&minimal_elf(&payload)).expect("write elf bytes");
    let path = file.path().to_str().expect("utf8 temp path").to_string();

    let config = Config {
        step_budget: 30,
        ..Config::default()
    };
    let mut sim = Simulator::from_elf(&path, &config).expect("load minimal elf");
    sim.run().expect("run to step budget");

    assert_eq!(sim.registers().read(1), 42);
    assert_eq!(sim.stats().cycles, 30);
    assert!(sim.stats().instructions_retired >= 1);
}

#[test]
fn missing_file_is_a_fatal_loader_failure() {
    let config = Config::default();
    let err = Simulator::from_elf("/nonexistent/path/to/nowhere.elf", &config).unwrap_err();
    assert!(matches!(err, rvsim_core::common::error::SimError::LoaderFailure { .. }));
}
