use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub const EXIT_NOT_FOUND: u8 = 127;
pub const EXIT_NOT_EXECUTABLE: u8 = 126;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PackError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PackError::Failed { status, .. } => status_code(status),
            PackError::Launch { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => EXIT_NOT_FOUND,
                _ => EXIT_NOT_EXECUTABLE,
            },
            PackError::Write { .. } => 1,
        }
    }
}

fn status_code(status: &ExitStatus) -> u8 {
    match status.code() {
        Some(code) => match u8::try_from(code) {
            Ok(0) | Err(_) => 1,
            Ok(x) => x,
        },
        None => signal_code(status),
    }
}

#[cfg(unix)]
fn signal_code(status: &ExitStatus) -> u8 {
    use std::os::unix::process::ExitStatusExt;

    status
        .signal()
        .and_then(|sig| u8::try_from(128 + sig).ok())
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn signal_code(_status: &ExitStatus) -> u8 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn exit_status(raw: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;

        ExitStatus::from_raw(raw)
    }

    #[cfg(unix)]
    #[test]
    fn failed_keeps_tool_exit_code() {
        let err = PackError::Failed {
            program: "packihx".into(),
            status: exit_status(3 << 8),
        };

        assert_eq!(err.exit_code(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn killed_by_signal_maps_above_128() {
        // SIGKILL
        let err = PackError::Failed {
            program: "packihx".into(),
            status: exit_status(9),
        };

        assert_eq!(err.exit_code(), 137);
    }

    #[test]
    fn launch_errors_are_distinct() {
        let missing = PackError::Launch {
            program: "packihx".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let denied = PackError::Launch {
            program: "packihx".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };

        assert_eq!(missing.exit_code(), EXIT_NOT_FOUND);
        assert_eq!(denied.exit_code(), EXIT_NOT_EXECUTABLE);
    }

    #[test]
    fn write_error_message_names_path() {
        let err = PackError::Write {
            path: PathBuf::from("out/firmware.ihx"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("out/firmware.ihx"));
    }
}
