//! An optional cache collaborator the pipeline does not use.
//!
//! The reference simulator's C++ has a set-associative, LRU-replacing
//! cache sitting in front of main memory (`Cache`, in its `cache.hpp`) with
//! its own two-phase request/response protocol, separate from the direct
//! `Memory` access this pipeline's Memory stage performs. This trait keeps
//! that interface's shape — `read`/`write`/`clock`/`busy` — in case a
//! future build wants to interpose one, but no stage constructs or calls
//! into a real implementation: [`NoCache`] is the only type provided, and
//! it answers every request in the same cycle it receives it.
//!
//! # Non-goals
//!
//! This is intentionally not a full cache simulation: no sets, no ways, no
//! LRU bookkeeping, no hit/miss counters. Wiring a real implementation into
//! the Memory stage's access path is future work with no pipeline-side
//! support today.

use crate::common::addr::Address;
use crate::common::error::SimError;

/// The result of a cache request that has not yet completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestStatus {
    /// Whether the in-flight request has finished.
    pub ready: bool,
    /// The value returned by a completed read. Meaningless for a write or
    /// an unready request.
    pub data: u32,
}

/// A memory-side cache's request/response surface.
///
/// Modelled on the reference implementation's `Cache` class: a request is
/// issued with `read`/`write`, progresses (possibly over several cycles)
/// via repeated `clock` calls, and its completion is observed through
/// `busy`/[`Cache::status`].
pub trait Cache {
    /// Issues a read request for `num_bytes` at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfRange`] if the access falls outside
    /// the backing memory.
    fn read(&mut self, addr: Address, num_bytes: u32) -> Result<(), SimError>;

    /// Issues a write request of `value`'s low `num_bytes` bytes at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfRange`] if the access falls outside
    /// the backing memory.
    fn write(&mut self, addr: Address, value: u32, num_bytes: u32) -> Result<(), SimError>;

    /// Advances the cache's internal request state by one cycle.
    fn clock(&mut self);

    /// Returns whether a request is still in flight.
    fn busy(&self) -> bool;

    /// Returns the status of the most recent request.
    fn status(&self) -> RequestStatus;
}

/// A pass-through, always-ready, zero-latency cache.
///
/// Every `read`/`write` completes immediately: `busy` is always `false` and
/// `status` is always ready after the call that issued it. This is what
/// lets the trait exist without any stage depending on an actual cache
/// being present.
#[derive(Debug, Default)]
pub struct NoCache {
    last: RequestStatus,
}

impl Cache for NoCache {
    fn read(&mut self, _addr: Address, _num_bytes: u32) -> Result<(), SimError> {
        self.last = RequestStatus {
            ready: true,
            data: 0,
        };
        Ok(())
    }

    fn write(&mut self, _addr: Address, _value: u32, _num_bytes: u32) -> Result<(), SimError> {
        self.last = RequestStatus {
            ready: true,
            data: 0,
        };
        Ok(())
    }

    fn clock(&mut self) {}

    fn busy(&self) -> bool {
        false
    }

    fn status(&self) -> RequestStatus {
        self.last
    }
}
