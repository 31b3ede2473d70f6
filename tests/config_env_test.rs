//! Environment variable overrides for Settings.
//!
//! Kept in its own test binary: environment variables are process-global.

use std::env;
use std::fs;

use tempfile::TempDir;

use snailfish::config::{Settings, LOCAL_CONFIG_FILE};

#[test]
fn given_env_vars_when_load_then_override_files() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join(LOCAL_CONFIG_FILE);
    fs::write(&local, "[reduction]\nmax_steps = 200\n[search]\nparallel = true\n").unwrap();

    env::set_var("SNAILFISH_REDUCTION__MAX_STEPS", "42");
    env::set_var("SNAILFISH_SEARCH__PARALLEL", "false");
    let settings = Settings::load_from(None, Some(&local));
    env::remove_var("SNAILFISH_REDUCTION__MAX_STEPS");
    env::remove_var("SNAILFISH_SEARCH__PARALLEL");

    let settings = settings.expect("load settings");
    assert_eq!(settings.reduction.max_steps, 42);
    assert!(!settings.search.parallel);
}
