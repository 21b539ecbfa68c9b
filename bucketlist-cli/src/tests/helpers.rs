//! Temporary workspaces for CLI tests.

use super::*;
use tempfile::TempDir;

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn store_options(&self) -> StoreOptions {
        StoreOptions {
            store_path: self.path("SavedPlaces"),
            key_file: Some(self.path("session.key")),
            protection: Protection::Complete,
        }
    }
}

/// Run `command` against an in-memory buffer and return what it printed.
pub(super) fn capture(
    run: impl FnOnce(&mut dyn std::io::Write) -> Result<(), CliError>,
) -> String {
    let mut buffer = Vec::new();
    run(&mut buffer).unwrap_or_else(|err| panic!("command failed: {err}"));
    String::from_utf8(buffer).expect("output should be UTF-8")
}
