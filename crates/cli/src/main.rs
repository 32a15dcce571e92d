//! RISC-V five-stage pipeline simulator CLI.
//!
//! Loads an ELF32 binary, steps the pipeline until it halts on a fatal
//! error or the configured step budget runs out, then prints the register
//! file and accumulated statistics.

use std::process;

use clap::Parser;

use rvsim_core::config::Config;
use rvsim_core::sim::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Cycle-accurate RV32I five-stage pipeline simulator"
)]
struct Cli {
    /// Path to the RV32I ELF32 binary to run.
    elf: String,

    /// Total bytes of memory to give the loaded program.
    #[arg(long, default_value_t = Config::default().memory_size)]
    memory_size: usize,

    /// Maximum cycles to run before giving up on a non-terminating program.
    #[arg(long, default_value_t = Config::default().step_budget)]
    step_budget: u64,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config {
        memory_size: cli.memory_size,
        step_budget: cli.step_budget,
    };

    let mut sim = Simulator::from_elf(&cli.elf, &config).unwrap_or_else(|err| {
        eprintln!("[!] could not load '{}': {err}", cli.elf);
        process::exit(1);
    });

    if let Err(err) = sim.run() {
        eprintln!("\n[!] FATAL: {err}");
        sim.registers().dump();
        println!("{}", sim.stats());
        process::exit(1);
    }

    println!("[*] step budget exhausted");
    sim.registers().dump();
    println!("{}", sim.stats());
}
