// sets up the sample test-scenario tree:
// <base>/<scenario>/gamemode.pwn for each scenario below
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{Error, Result};

// where the scenarios go unless told otherwise
pub const DEFAULT_BASE_DIR: &str = "test-scenarios";

pub const SCENARIOS: [&str; 6] = [
    "install",
    "remove",
    "build",
    "legacy",
    "versions",
    "integration",
];

pub const FIXTURE_NAME: &str = "gamemode.pwn";
pub const FIXTURE_CONTENTS: &str = r#"main() { print("Test scenario"); }"#;

// create every scenario directory and (re)write its fixture.
// returns the fixture paths in scenario order.
pub fn setup_scenarios<W: Write>(base: &Path, out: &mut W) -> Result<Vec<PathBuf>> {
    writeln!(out, "Setting up test scenarios...")?;

    let mut dirs = Vec::with_capacity(SCENARIOS.len());
    for name in SCENARIOS {
        let dir = base.join(name);
        fs::create_dir_all(&dir).map_err(|err| Error::io_at(&dir, err))?;
        dirs.push(dir);
    }

    warn_about_strays(base)?;

    let mut fixtures = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let fixture = dir.join(FIXTURE_NAME);
        fs::write(&fixture, FIXTURE_CONTENTS).map_err(|err| Error::io_at(&fixture, err))?;
        debug!(path = %fixture.display(), "wrote fixture");
        fixtures.push(fixture);
    }

    writeln!(out, "Test scenarios created successfully")?;
    out.flush()?;

    Ok(fixtures)
}

// directories under `base` that aren't ours are left alone
fn warn_about_strays(base: &Path) -> Result<()> {
    for entry in WalkDir::new(base).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !SCENARIOS.contains(&&*name) {
            warn!(
                path = %entry.path().display(),
                "not a known test scenario, leaving it untouched"
            );
        }
    }
    Ok(())
}
