// the error module
pub mod error;

// where all cli related stuff goes
pub mod cli;

// running external programs
pub mod command_runner;

pub mod logging;

// the test scenario fixtures
pub mod scenarios;

// steps, tasks and the fail-fast loop
pub mod step;

// check, format and test
pub mod tasks;

pub use cli::{parse_args, CliArgs, Job};
pub use command_runner::{CommandRunner, RealCommandRunner};
pub use error::{Error, ErrorKind, Result};

use std::{
    future::Future,
    io::{self, Write},
};

use scenarios::setup_scenarios;
use step::run_task;
use tracing::debug;

// do one job, printing status text to `out`
pub fn run_job<R, W>(args: &CliArgs, runner: &R, out: &mut W) -> Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    match &args.job {
        Job::Check => run_task(runner, &args.cargo, &tasks::CHECK, out),
        Job::Format => run_task(runner, &args.cargo, &tasks::FORMAT, out),
        Job::Test => run_task(runner, &args.cargo, &tasks::TEST, out),
        Job::SetupScenarios { dir } => setup_scenarios(dir, out).map(|_| ()),
    }
}

// the entry point for the whole program.
// the job blocks on a worker thread while we wait for Ctrl+C here;
// whichever comes first decides how the run ends.
pub fn pipeline(args: CliArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    debug!(job = ?args.job, cargo = ?args.cargo, "starting");

    let result = runtime.block_on(async move {
        // installed before the job starts, so an early Ctrl+C can't kill us outright
        let interrupted = interrupt_listener()?;

        let job = tokio::task::spawn_blocking(move || {
            // not locked up front: main still needs stdout if we get interrupted
            run_job(&args, &RealCommandRunner, &mut io::stdout())
        });

        tokio::select! {
            biased;
            _ = interrupted => Err(Error::new(ErrorKind::Interrupted)),
            joined = job => joined.unwrap_or_else(|e| {
                Err(Error::new(ErrorKind::Runtime(e.to_string())))
            }),
        }
    });

    // the worker may still be waiting on its child, don't wait for it
    runtime.shutdown_background();

    result
}

// resolves on the first Ctrl+C; never resolves if the signal stream goes away
#[cfg(unix)]
fn interrupt_listener() -> Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    Ok(async move {
        if sigint.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    })
}

#[cfg(not(unix))]
fn interrupt_listener() -> Result<impl Future<Output = ()>> {
    Ok(async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
}
