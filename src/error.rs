use std::{error::Error as StdError, fmt, io::Error as IOError, path::PathBuf};

use walkdir::Error as WalkError;

// A type alias for `Result<T, xtask::Error>`.
pub type Result<T> = anyhow::Result<T, Error>;

// An error that can happen.
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    // A crate private constructor for `Error`.
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    // Attach the path we were working on to an io error.
    pub(crate) fn io_at(path: impl Into<PathBuf>, err: IOError) -> Error {
        Error::new(ErrorKind::Io {
            path: Some(path.into()),
            source: err,
        })
    }

    // Return the specific type of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    // Unwrap this error into its underlying type.
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    // Step failures print their own messages, `main` shouldn't repeat them.
    pub fn already_reported(&self) -> bool {
        matches!(*self.0, ErrorKind::StepFailed { .. })
    }
}

// The specific type of error that can occur.
#[derive(Debug)]
pub enum ErrorKind {
    // an external command exited with a non-zero status
    StepFailed { program: String, code: Option<i32> },
    // an external command could not be started at all
    Spawn { program: String, source: IOError },
    Io { path: Option<PathBuf>, source: IOError },
    Walk(WalkError),
    // the user pressed Ctrl+C
    Interrupted,
    Runtime(String),
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &*self.0 {
            ErrorKind::Spawn { source, .. } | ErrorKind::Io { source, .. } => Some(source),
            ErrorKind::Walk(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ErrorKind::StepFailed {
                program,
                code: Some(code),
            } => write!(f, "{} exited with status {}", program, code),
            ErrorKind::StepFailed {
                program,
                code: None,
            } => write!(f, "{} was terminated by a signal", program),
            ErrorKind::Spawn { program, source } => {
                write!(f, "could not run {}: {}", program, source)
            }
            ErrorKind::Io {
                path: Some(path),
                source,
            } => write!(f, "{}: {}", path.display(), source),
            ErrorKind::Io { path: None, source } => write!(f, "IO error: {}", source),
            ErrorKind::Walk(err) => write!(f, "could not read directory: {}", err),
            ErrorKind::Interrupted => write!(f, "User interrupted"),
            ErrorKind::Runtime(msg) => write!(f, "runtime error: {}", msg),
        }
    }
}

// down here are all the conversion implementations
impl From<IOError> for Error {
    fn from(err: IOError) -> Error {
        Error::new(ErrorKind::Io {
            path: None,
            source: err,
        })
    }
}

impl From<WalkError> for Error {
    fn from(err: WalkError) -> Error {
        Error::new(ErrorKind::Walk(err))
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind as IOErrorKind;

    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = Error::io_at(
            "test-scenarios/install",
            IOError::new(IOErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "test-scenarios/install: permission denied"
        );
        assert!(!err.already_reported());
    }

    #[test]
    fn test_step_failure_is_already_reported() {
        let err = Error::new(ErrorKind::StepFailed {
            program: "cargo".into(),
            code: Some(101),
        });
        assert!(err.already_reported());
        assert_eq!(err.to_string(), "cargo exited with status 101");
    }
}
