use clap::{arg, command, value_parser, ArgMatches, Command};

use crate::scenarios::DEFAULT_BASE_DIR;
use std::{ffi::OsString, path::PathBuf};

// which job to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Check,
    Format,
    Test,
    SetupScenarios { dir: PathBuf },
}

// a struct to contain all the cliargs
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub job: Job,
    // the build tool; cargo sets $CARGO for aliases
    pub cargo: OsString,
    pub verbose: bool,
}

pub fn build_cli() -> Command {
    command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(--cargo <PATH> "The cargo binary to invoke")
                .required(false)
                .env("CARGO")
                .default_value("cargo")
                .value_parser(value_parser!(OsString))
                .global(true),
        )
        .arg(arg!(-v --verbose "Print debug logs to stderr").global(true))
        .subcommand(Command::new("check").about("Check formatting, run clippy and check compilation"))
        .subcommand(Command::new("format").about("Format all Rust code"))
        .subcommand(Command::new("test").about("Run the test suite in release mode"))
        .subcommand(
            Command::new("setup-scenarios")
                .about("Create the sample test scenario directories")
                .arg(
                    arg!(--dir <DIR> "Where to create the scenarios")
                        .required(false)
                        .default_value(DEFAULT_BASE_DIR)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

pub fn parse_args() -> CliArgs {
    from_matches(&build_cli().get_matches())
}

pub fn from_matches(matches: &ArgMatches) -> CliArgs {
    let job = match matches.subcommand() {
        Some(("format", _)) => Job::Format,
        Some(("test", _)) => Job::Test,
        Some(("setup-scenarios", sub)) => Job::SetupScenarios {
            dir: sub
                .get_one::<PathBuf>("dir")
                .cloned()
                .expect("defaulted by clap"),
        },
        // "check" is the only one left, clap rejects anything else
        _ => Job::Check,
    };

    let cargo = matches
        .get_one::<OsString>("cargo")
        .cloned()
        .expect("defaulted by clap");

    CliArgs {
        job,
        cargo,
        verbose: matches.get_flag("verbose"),
    }
}
