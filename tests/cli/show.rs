use anyhow::Result;
use predicates::str::{contains, diff};
use remind::format::tabular_output;

use super::helpers::{add, remind, StoreGuard};

#[test]
fn show_lists_reminders() -> Result<()> {
    let guard = StoreGuard::new()?;
    add(&guard, "first", "+1m", 0).assert().success();
    add(&guard, "second", "+2m", 0).assert().success();
    let expected_output = tabular_output(&guard.read_reminders()?);
    remind(guard.path(), &["show"])
        .assert()
        .success()
        .stdout(diff(expected_output));
    Ok(())
}

#[test]
fn show_without_store() -> Result<()> {
    let guard = StoreGuard::new()?;
    remind(guard.path(), &["show"])
        .assert()
        .success()
        .stdout(contains("MESSAGE"));
    Ok(())
}
