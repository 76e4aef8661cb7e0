use crate::{Error, ErrorKind, Result};
use std::{
    ffi::OsString,
    process::{Command, ExitStatus, Stdio},
};
use tracing::debug;

// a single external program call: the program and its argument vector.
// we never go through a shell, so nothing here is ever re-quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Invocation {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    // the program name, for messages
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

// how an external command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    // `None` when the child was killed by a signal other than an interrupt
    Failed(Option<i32>),
    // the child died from the user's Ctrl+C
    Interrupted,
}

impl From<ExitStatus> for Outcome {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            return Outcome::Success;
        }
        if killed_by_interrupt(&status) {
            return Outcome::Interrupted;
        }
        Outcome::Failed(status.code())
    }
}

#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(libc::SIGINT)
}

#[cfg(windows)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    // STATUS_CONTROL_C_EXIT
    status.code() == Some(0xC000_013Au32 as i32)
}

#[cfg(not(any(unix, windows)))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}

pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<Outcome>;
}

// runs commands for real, with the child sharing our terminal
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<Outcome> {
        debug!(program = ?invocation.program, args = ?invocation.args, "spawning");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| {
                Error::new(ErrorKind::Spawn {
                    program: invocation.program_name(),
                    source,
                })
            })?;

        debug!(?status, "command finished");
        Ok(Outcome::from(status))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_real_runner_success() {
        let outcome = RealCommandRunner
            .run(&Invocation::new("true", Vec::<&str>::new()))
            .unwrap();
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_real_runner_keeps_exit_code() {
        let outcome = RealCommandRunner
            .run(&Invocation::new("sh", ["-c", "exit 3"]))
            .unwrap();
        assert_eq!(outcome, Outcome::Failed(Some(3)));
    }

    #[test]
    fn test_real_runner_arguments_are_not_shell_expanded() {
        // `$0` would be the shell name if this went through another shell
        let outcome = RealCommandRunner
            .run(&Invocation::new("test", ["$0", "=", "$0"]))
            .unwrap();
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_real_runner_sigint_is_interrupt() {
        let outcome = RealCommandRunner
            .run(&Invocation::new("sh", ["-c", "kill -INT $$"]))
            .unwrap();
        assert_eq!(outcome, Outcome::Interrupted);
    }

    #[test]
    fn test_real_runner_missing_program() {
        let err = RealCommandRunner
            .run(&Invocation::new(
                "xtask-no-such-program-12345",
                Vec::<&str>::new(),
            ))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Spawn { .. }));
    }
}
