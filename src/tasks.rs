// the three cargo sequences we know how to run

use crate::step::{Step, Task, BANNER};

pub const CHECK: Task = Task {
    name: "check",
    title: Some("Checking Code Quality"),
    steps: &[
        Step {
            args: &["fmt", "--all", "--", "--check"],
            start: "[1/3] Checking code formatting...",
            success: "[OK] Code formatting is correct",
            failure: "[ERROR] Code is not formatted correctly",
            hint: Some("cargo fmt --all\n  or: cargo xtask format"),
        },
        Step {
            args: &[
                "clippy",
                "--all-targets",
                "--all-features",
                "--",
                "-D",
                "warnings",
            ],
            start: "[2/3] Running Clippy linter...",
            success: "[OK] No Clippy warnings",
            failure: "[ERROR] Clippy found issues",
            hint: None,
        },
        Step {
            args: &["check", "--all-targets", "--all-features"],
            start: "[3/3] Checking compilation...",
            success: "[OK] Code compiles successfully",
            failure: "[ERROR] Compilation check failed",
            hint: None,
        },
    ],
    gap: true,
    footer: &[BANNER, "[SUCCESS] All checks passed!", BANNER, ""],
};

pub const FORMAT: Task = Task {
    name: "format",
    title: None,
    steps: &[Step {
        args: &["fmt", "--all"],
        start: "Formatting Rust code...",
        success: "[SUCCESS] Code formatted successfully!",
        failure: "[ERROR] Failed to format code.",
        hint: None,
    }],
    gap: true,
    footer: &["Run this to check formatting:", "  cargo fmt --all -- --check"],
};

// release profile, verbose output
pub const TEST: Task = Task {
    name: "test",
    title: Some("Running Tests"),
    steps: &[Step {
        args: &["test", "--release", "--verbose"],
        start: "Running unit tests...",
        success: "\n========================================\n[SUCCESS] All tests passed!\n========================================",
        failure: "\n========================================\n[ERROR] Tests failed!\n========================================",
        hint: None,
    }],
    gap: false,
    footer: &[],
};

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;
    use crate::{
        command_runner::{Invocation, Outcome},
        step::{run_task, tests::ScriptedRunner},
        ErrorKind,
    };

    #[test]
    fn test_check_runs_fmt_clippy_check_in_order() {
        let runner = ScriptedRunner::new(&[Outcome::Success; 3]);
        let mut out = Vec::new();
        run_task(&runner, OsStr::new("cargo"), &CHECK, &mut out).unwrap();

        let seen = runner.seen.borrow();
        assert_eq!(seen[0], Invocation::new("cargo", ["fmt", "--all", "--", "--check"]));
        assert_eq!(
            seen[1],
            Invocation::new(
                "cargo",
                ["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"]
            )
        );
        assert_eq!(
            seen[2],
            Invocation::new("cargo", ["check", "--all-targets", "--all-features"])
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\n========================================\nChecking Code Quality\n"));
        assert!(text.contains("[SUCCESS] All checks passed!"));
    }

    #[test]
    fn test_check_format_failure_shows_fix() {
        let runner = ScriptedRunner::new(&[Outcome::Failed(Some(1))]);
        let mut out = Vec::new();
        let err = run_task(&runner, OsStr::new("cargo"), &CHECK, &mut out).unwrap_err();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(
            "[ERROR] Code is not formatted correctly\n\nRun this to fix:\n  cargo fmt --all\n  or: cargo xtask format\n"
        ));
        assert!(!text.contains("[2/3]"));
        assert!(matches!(err.kind(), ErrorKind::StepFailed { .. }));
    }

    #[test]
    fn test_test_task_uses_release_profile() {
        let runner = ScriptedRunner::new(&[Outcome::Failed(Some(101))]);
        let mut out = Vec::new();
        run_task(&runner, OsStr::new("/opt/cargo"), &TEST, &mut out).unwrap_err();

        assert_eq!(
            runner.seen.borrow()[0],
            Invocation::new("/opt/cargo", ["test", "--release", "--verbose"])
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[ERROR] Tests failed!"));
        assert!(!text.contains("[SUCCESS]"));
    }

    #[test]
    fn test_test_task_ends_on_the_banner() {
        let runner = ScriptedRunner::new(&[Outcome::Success]);
        let mut out = Vec::new();
        run_task(&runner, OsStr::new("cargo"), &TEST, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(
            "Running unit tests...\n\n========================================\n[SUCCESS] All tests passed!\n========================================\n"
        ));
    }

    #[test]
    fn test_xtask_alias_is_defined() {
        let config = include_str!("../.cargo/config.toml");
        assert!(config.contains("[alias]"));
        assert!(config.contains(r#"xtask = "run --package xtask --""#));
    }

    #[test]
    fn test_format_prints_check_hint() {
        let runner = ScriptedRunner::new(&[Outcome::Success]);
        let mut out = Vec::new();
        run_task(&runner, OsStr::new("cargo"), &FORMAT, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Formatting Rust code...\n[SUCCESS] Code formatted successfully!\n\nRun this to check formatting:\n  cargo fmt --all -- --check\n"
        );
    }
}
