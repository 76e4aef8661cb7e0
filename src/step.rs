//! Running steps and fail-fast sequences of steps.
//!
//! A [`Step`] is one external command together with the messages printed
//! around it. A [`Task`] is an ordered list of steps; the first failing step
//! ends the task and nothing after it runs.

use std::{ffi::OsStr, io::Write};

use tracing::debug;

use crate::{
    command_runner::{CommandRunner, Invocation, Outcome},
    Error, ErrorKind, Result,
};

pub const BANNER: &str = "========================================";

/// One external command and its status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Arguments passed to the build tool.
    pub args: &'static [&'static str],
    pub start: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
    /// Printed after a blank line when the step fails.
    pub hint: Option<&'static str>,
}

/// A named, ordered list of steps plus the text around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub name: &'static str,
    /// Printed as a banner before the first step.
    pub title: Option<&'static str>,
    pub steps: &'static [Step],
    /// Leave a blank line after each passing step.
    pub gap: bool,
    /// Printed line by line once every step has passed.
    pub footer: &'static [&'static str],
}

impl Step {
    pub fn invocation(&self, tool: &OsStr) -> Invocation {
        Invocation::new(tool, self.args.iter().copied())
    }
}

/// Run a single step and report how it went on `out`.
pub fn run_step<R, W>(runner: &R, tool: &OsStr, step: &Step, out: &mut W) -> Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    writeln!(out, "{}", step.start)?;
    // the child writes straight to the terminal, so our text has to be out first
    out.flush()?;

    let invocation = step.invocation(tool);
    match runner.run(&invocation)? {
        Outcome::Success => {
            writeln!(out, "{}", step.success)?;
            Ok(())
        }
        Outcome::Failed(code) => {
            debug!(args = ?step.args, ?code, "step failed");
            writeln!(out, "{}", step.failure)?;
            if let Some(hint) = step.hint {
                writeln!(out)?;
                writeln!(out, "Run this to fix:")?;
                writeln!(out, "  {}", hint)?;
            }
            out.flush()?;
            Err(Error::new(ErrorKind::StepFailed {
                program: invocation.program_name(),
                code,
            }))
        }
        // no status line for a step the user cancelled
        Outcome::Interrupted => Err(Error::new(ErrorKind::Interrupted)),
    }
}

/// Run every step of `task` in order, stopping at the first failure.
pub fn run_task<R, W>(runner: &R, tool: &OsStr, task: &Task, out: &mut W) -> Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    debug!(task = task.name, steps = task.steps.len(), "running task");

    if let Some(title) = task.title {
        writeln!(out)?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "{}", title)?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out)?;
    }

    for step in task.steps {
        run_step(runner, tool, step, out)?;
        if task.gap {
            writeln!(out)?;
        }
    }

    for line in task.footer {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}
