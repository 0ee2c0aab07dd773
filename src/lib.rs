//! Runs the `packihx` tool on an object file and stores its output.

pub mod error;
pub mod packer;

use std::path::Path;

pub use error::PackError;
pub use packer::{Packed, Packer, DEFAULT_PACKER};

/// `output` is only touched when the packer exits successfully.
pub fn pack_file(packer: &Packer, input: &Path, output: &Path) -> Result<usize, PackError> {
    let packed = packer.run(input)?;

    packed.write_to(output)?;

    Ok(packed.len())
}
