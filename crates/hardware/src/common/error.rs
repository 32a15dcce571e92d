//! Fatal simulator errors.
//!
//! Every fault this simulator can hit is terminal: there is no trap handler,
//! no privileged mode to deliver an exception to, and no retry path. A
//! `SimError` always means the simulation run is over.

use thiserror::Error;

use super::addr::Address;

/// A fatal simulator error.
///
/// There is no recovery from any of these: the caller's only remaining
/// action is to stop the run and report the failure.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// No entry in the ISA table matched a fetched instruction word.
    ///
    /// The associated values are the faulting program counter and the raw
    /// 32-bit word that failed to decode.
    #[error("decode failure at {pc}: no ISA table entry matches {raw:#010x}")]
    DecodeFailure {
        /// Program counter of the undecodable instruction.
        pc: Address,
        /// The raw instruction word that matched no ISA table entry.
        raw: u32,
    },

    /// A memory access fell outside the bounds of the memory image.
    ///
    /// The associated values are the address that was accessed and the
    /// number of bytes the access attempted to touch.
    #[error("memory access out of range: address {addr} (+{size} bytes) exceeds image size")]
    MemoryOutOfRange {
        /// The address the access started at.
        addr: Address,
        /// The size in bytes of the attempted access.
        size: u32,
    },

    /// The ELF image could not be loaded.
    ///
    /// The associated value describes what went wrong: a malformed header,
    /// an unsupported byte order, or an image with no loadable segments.
    #[error("failed to load program image: {reason}")]
    LoaderFailure {
        /// Human-readable description of why loading failed.
        reason: String,
    },
}
