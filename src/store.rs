use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::{from_slice, to_vec};

use crate::error::StoreError;
use crate::reminder::Reminder;
use crate::trace::Stopwatch;

/// A flat JSON array of reminders on disk.
///
/// Every save rewrites the whole file. There is no locking, so with two
/// concurrent writers the last one wins.
pub struct ReminderStore {
    path: PathBuf,
}

impl ReminderStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ReminderStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// A missing or blank file is an empty list.
    pub fn load(&self) -> Result<Vec<Reminder>, StoreError> {
        let watch = Stopwatch::start("load reminders");
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no reminder store at {}, starting empty", self.path.display());
                return Ok(vec![]);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let reminders = decode(&bytes)?;
        watch.finish();
        Ok(reminders)
    }

    /// Replaces the file through a temporary sibling and a rename, so a
    /// crash leaves either the old or the new content. A symlinked store is
    /// written through to its target, and an existing file keeps its mode.
    pub fn save(&self, reminders: &[Reminder]) -> Result<(), StoreError> {
        let watch = Stopwatch::start("save reminders");
        let bytes = encode(reminders)?;
        let target = resolve_target(&self.path)?;
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = temp_builder()
            .tempfile_in(dir)
            .map_err(|e| StoreError::io(dir, e))?;
        match fs::metadata(&target) {
            Ok(metadata) => tmp
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| StoreError::io(tmp.path(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&target, e)),
        }
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&target)
            .map_err(|e| StoreError::io(&target, e.error))?;
        debug!(
            "wrote {} reminders to {}",
            reminders.len(),
            target.display()
        );
        watch.finish();
        Ok(())
    }

    pub fn append(&self, reminder: Reminder) -> Result<Vec<Reminder>, StoreError> {
        let mut reminders = self.load()?;
        reminders.push(reminder);
        self.save(&reminders)?;
        Ok(reminders)
    }
}

// follows symlinks, including dangling ones, to the file that should be replaced
fn resolve_target(path: &Path) -> Result<PathBuf, StoreError> {
    let mut target = path.to_path_buf();
    // bounded, a symlink loop ends up as a plain rename over the last hop
    for _ in 0..32 {
        match fs::symlink_metadata(&target) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                let link = fs::read_link(&target).map_err(|e| StoreError::io(&target, e))?;
                target = match target.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                };
            }
            Ok(_) => break,
            Err(e) if e.kind() == ErrorKind::NotFound => break,
            Err(e) => return Err(StoreError::io(&target, e)),
        }
    }
    Ok(target)
}

// new stores get the same mode a plain create would give them
#[cfg(unix)]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder.permissions(Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

pub fn decode(bytes: &[u8]) -> Result<Vec<Reminder>, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(vec![]);
    }
    from_slice(bytes).map_err(StoreError::Decode)
}

pub fn encode(reminders: &[Reminder]) -> Result<Vec<u8>, StoreError> {
    to_vec(reminders).map_err(StoreError::Encode)
}
