//! ELF32 program loading.
//!
//! Parses a RISC-V ELF32 executable with the `object` crate, copies every
//! loadable segment into a flat byte image sized by [`Config::memory_size`],
//! and derives the entry PC and initial stack pointer the pipeline's
//! [`Memory`] is constructed from. There is no fallback for a missing entry
//! point or an image that doesn't fit: either is a fatal
//! [`SimError::LoaderFailure`], exactly as a decode failure or an
//! out-of-range access is fatal once the simulation is running.

use object::{Object, ObjectSegment};

use crate::common::addr::Address;
use crate::common::error::SimError;
use crate::config::Config;
use crate::memory::Memory;

/// Loads an ELF32 image from `path` into a [`Memory`] sized per `config`.
///
/// The initial stack pointer is placed 16 bytes below the top of the
/// configured image, aligned down to 16 bytes, matching the standard
/// RISC-V calling convention's expectation that `sp` starts aligned.
///
/// # Errors
///
/// Returns [`SimError::LoaderFailure`] if the file cannot be read, is not a
/// parseable ELF image, has no loadable segments, or doesn't fit within
/// `config.memory_size`.
pub fn load(path: &str, config: &Config) -> Result<Memory, SimError> {
    let bytes = std::fs::read(path).map_err(|err| SimError::LoaderFailure {
        reason: format!("could not read '{path}': {err}"),
    })?;

    load_bytes(&bytes, config)
}

fn load_bytes(bytes: &[u8], config: &Config) -> Result<Memory, SimError> {
    let object = object::File::parse(bytes).map_err(|err| SimError::LoaderFailure {
        reason: format!("could not parse ELF image: {err}"),
    })?;

    let mut image = vec![0u8; config.memory_size];
    let mut segments_loaded = 0u32;

    for segment in object.segments() {
        let addr = segment.address();
        let data = segment.data().map_err(|err| SimError::LoaderFailure {
            reason: format!("could not read segment data: {err}"),
        })?;
        if data.is_empty() {
            continue;
        }

        let start = usize::try_from(addr).map_err(|_| SimError::LoaderFailure {
            reason: format!("segment address {addr:#x} does not fit this machine's address space"),
        })?;
        let end = start.checked_add(data.len()).ok_or_else(|| SimError::LoaderFailure {
            reason: format!("segment at {addr:#x} overflows the address space"),
        })?;
        if end > image.len() {
            return Err(SimError::LoaderFailure {
                reason: format!(
                    "segment [{start:#x}, {end:#x}) does not fit in a {}-byte image",
                    image.len()
                ),
            });
        }

        image[start..end].copy_from_slice(data);
        segments_loaded += 1;
    }

    if segments_loaded == 0 {
        return Err(SimError::LoaderFailure {
            reason: "ELF image has no loadable segments".to_string(),
        });
    }

    let entry = u32::try_from(object.entry()).map_err(|_| SimError::LoaderFailure {
        reason: format!(
            "entry point {:#x} does not fit this machine's address space",
            object.entry()
        ),
    })?;

    let stack_pointer = (image.len() as u32).saturating_sub(16) & !0xF;

    tracing::info!(
        entry = %Address::new(entry),
        segments = segments_loaded,
        image_size = image.len(),
        "loaded ELF image",
    );

    Ok(Memory::new(image, Address::new(entry), stack_pointer))
}
