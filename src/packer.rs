use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::PackError;

pub const DEFAULT_PACKER: &str = "packihx";

/// External tool that turns an object file into packed Intel HEX on stdout.
#[derive(Clone, Debug)]
pub struct Packer {
    program: OsString,
}

impl Default for Packer {
    fn default() -> Self {
        Packer::new(DEFAULT_PACKER)
    }
}

impl Packer {
    pub fn new(program: impl Into<OsString>) -> Self {
        Packer {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Runs `<program> <input>` and captures its standard output. Stdin and
    /// stderr are shared with the caller, as the tool may prompt or report.
    pub fn run(&self, input: &Path) -> Result<Packed, PackError> {
        let program = self.program().to_string_lossy().into_owned();

        log::debug!("running {} {}", program, input.display());

        let output = Command::new(&self.program)
            .arg(input)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| PackError::Launch {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            log::warn!("{} exited with {}", program, output.status);

            return Err(PackError::Failed {
                program,
                status: output.status,
            });
        }

        log::info!("{} produced {} bytes", program, output.stdout.len());

        Ok(Packed::from(output.stdout))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packed {
    pub buffer: Vec<u8>,
}

impl Packed {
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn write_to(&self, path: &Path) -> Result<(), PackError> {
        let write_err = |source| PackError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = fs::File::create(path).map_err(write_err)?;
        writer.write_all(&self.buffer[..]).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        Ok(())
    }
}

impl From<Vec<u8>> for Packed {
    fn from(buffer: Vec<u8>) -> Self {
        Packed { buffer }
    }
}

impl From<Packed> for Vec<u8> {
    fn from(packed: Packed) -> Self {
        packed.buffer
    }
}
