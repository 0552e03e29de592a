use anyhow::Result;
use predicates::str::contains;

use super::helpers::{add, remind, remind_with_env, StoreGuard};

#[test]
fn append_to_existing_store() -> Result<()> {
    let guard = StoreGuard::with_content(r#"[{"start":1000}]"#)?;
    add(&guard, "standup", "+1h", 2000)
        .assert()
        .success()
        .stdout(contains("Successfully added the reminder!"));
    assert_eq!(
        guard.content()?,
        r#"[{"start":1000},{"message":"standup","start":5600}]"#
    );
    Ok(())
}

#[test]
fn first_run_creates_store() -> Result<()> {
    let guard = StoreGuard::new()?;
    add(&guard, "water plants", "+2d", 0).assert().success();
    let reminders = guard.read_reminders()?;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].message, "water plants");
    assert_eq!(reminders[0].start, 2.0 * 86400.0);
    Ok(())
}

#[test]
fn empty_message_is_omitted() -> Result<()> {
    let guard = StoreGuard::new()?;
    add(&guard, "", "", 1234).assert().success();
    assert_eq!(guard.content()?, r#"[{"start":1234}]"#);
    Ok(())
}

#[test]
fn with_end() -> Result<()> {
    let guard = StoreGuard::new()?;
    remind(
        guard.path(),
        &[
            "add", "--msg", "call", "--start", "+5m", "--end", "+9m", "--now", "60",
        ],
    )
    .assert()
    .success();
    assert_eq!(
        guard.content()?,
        r#"[{"message":"call","start":360,"end":600}]"#
    );
    Ok(())
}

#[test]
fn malformed_start_is_rejected() -> Result<()> {
    let guard = StoreGuard::with_content(r#"[{"start":1000}]"#)?;
    add(&guard, "standup", "+xh", 2000)
        .assert()
        .failure()
        .stderr(contains("malformed offset"));
    add(&guard, "standup", "@99:99", 2000)
        .assert()
        .failure()
        .stderr(contains("malformed time of day"));
    assert_eq!(guard.content()?, r#"[{"start":1000}]"#);
    Ok(())
}

#[test]
fn corrupt_store_is_reported() -> Result<()> {
    let guard = StoreGuard::with_content("not json")?;
    add(&guard, "standup", "+1h", 2000)
        .assert()
        .failure()
        .stderr(contains("fail to add reminder"));
    assert_eq!(guard.content()?, "not json");
    Ok(())
}

#[test]
fn store_from_env() -> Result<()> {
    let guard = StoreGuard::with_content(r#"[{"start":1000}]"#)?;
    remind_with_env(
        Some(guard.path()),
        &["add", "--msg", "standup", "--start", "+1h", "--now", "2000"],
    )
    .assert()
    .success();
    assert_eq!(
        guard.content()?,
        r#"[{"start":1000},{"message":"standup","start":5600}]"#
    );
    Ok(())
}

#[test]
fn db_flag_wins_over_env() -> Result<()> {
    let from_env = StoreGuard::with_content("[]")?;
    let from_flag = StoreGuard::new()?;
    remind_with_env(
        Some(from_env.path()),
        &["add", "--msg", "standup", "--start", "+1h", "--now", "2000"],
    )
    .arg("--db")
    .arg(from_flag.path())
    .assert()
    .success();
    assert_eq!(from_env.content()?, "[]");
    assert_eq!(
        from_flag.content()?,
        r#"[{"message":"standup","start":5600}]"#
    );
    Ok(())
}

#[test]
fn fractional_now() -> Result<()> {
    let guard = StoreGuard::new()?;
    remind(
        guard.path(),
        &["add", "--msg", "tea", "--start", "+1m", "--now", "2000.5"],
    )
    .assert()
    .success();
    assert_eq!(guard.content()?, r#"[{"message":"tea","start":2060.5}]"#);
    Ok(())
}

#[test]
fn invalid_now_is_rejected() -> Result<()> {
    let guard = StoreGuard::new()?;
    remind(
        guard.path(),
        &["add", "--msg", "tea", "--start", "+1m", "--now", "1e30"],
    )
    .assert()
    .failure()
    .stderr(contains("invalid --now"));
    Ok(())
}
