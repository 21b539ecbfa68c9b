//! Filesystem helpers built on `cap-std` and `camino`.
//!
//! Writes go through [`write_atomic`]: the bytes land in a staging file next
//! to the target, are synced, and then renamed over it, so readers observe
//! either the previous contents or the new ones. Files are created readable
//! by the owner only.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs, fs_utf8};
use std::io::{self, Write};
use std::path::Component;

/// Suffix appended to the target file name while a write is staged.
const STAGING_SUFFIX: &str = ".partial";

/// Unix mode applied to every file this crate creates.
#[cfg(unix)]
const OWNER_ONLY_MODE: u32 = 0o600;

/// Open the directory containing `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} should include a file name")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Read the whole file at `path`.
///
/// A missing file surfaces as [`io::ErrorKind::NotFound`].
pub fn read_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let (dir, file_name) = open_dir_and_file(path)?;
    dir.read(file_name)
}

/// Replace the file at `path` with `contents` in a single rename.
///
/// Missing parent directories are created first. On failure the previous
/// file, if any, is left untouched and the staging file is removed.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, file_name) = open_dir_and_file(path)?;
    let staging = format!(".{file_name}{STAGING_SUFFIX}");

    let outcome = stage(&dir, &staging, contents)
        .and_then(|()| dir.rename(&staging, &dir, &file_name));
    if outcome.is_err() {
        // Best effort; the original error is the one worth reporting.
        dir.remove_file(&staging).ok();
    }
    outcome
}

fn stage(dir: &fs_utf8::Dir, staging: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    let mut file = dir.open_with(staging, &options)?;
    restrict_to_owner(&file)?;
    file.write_all(contents)?;
    file.flush()?;
    file.sync_all()
}

#[cfg(unix)]
fn restrict_to_owner(file: &fs_utf8::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(OWNER_ONLY_MODE);
    file.set_permissions(fs::Permissions::from_std(permissions))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &fs_utf8::File) -> io::Result<()> {
    Ok(())
}

/// Ensure the parent directory for `path` exists, handling absolute paths safely for cap-std.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Split a directory path into an ambient anchor directory (root, drive
/// prefix, or the current directory) and the remaining relative suffix.
fn split_anchor(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (anchor, relative) = match std_parent.components().next() {
        // Windows drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let anchor = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR_STR);
            let relative = std_parent
                .strip_prefix(anchor.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (anchor, relative)
        }
        Some(Component::RootDir) => {
            let anchor = Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR);
            let relative = std_parent
                .strip_prefix(anchor.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (anchor, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;
    Ok((dir, relative))
}
