//! Session key guarding the protected store file.

use std::{fmt, io};

use camino::Utf8Path;
use chacha20poly1305::{
    Key, KeyInit, XChaCha20Poly1305,
    aead::OsRng,
};
use log::debug;

use super::StoreError;

/// Length of a [`SessionKey`] in bytes.
pub const KEY_LEN: usize = 32;

/// Symmetric key that unlocks the protected store file.
///
/// Holding a key models the device being unlocked: without it the sealed
/// file cannot be read. The key bytes never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey([u8; KEY_LEN]);

impl SessionKey {
    /// Draw a new key from the operating system's random source.
    #[must_use]
    pub fn generate() -> Self {
        let generated = XChaCha20Poly1305::generate_key(&mut OsRng);
        let mut bytes = [0_u8; KEY_LEN];
        bytes.copy_from_slice(generated.as_slice());
        Self(bytes)
    }

    /// Wrap existing key material.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Read the key stored at `path`, creating and saving a fresh one when
    /// the file does not exist yet.
    ///
    /// New key files are written atomically and readable by the owner only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyRead`] or [`StoreError::KeyWrite`] on I/O
    /// failure and [`StoreError::KeyLength`] when the file holds anything
    /// other than exactly [`KEY_LEN`] bytes.
    pub fn load_or_create(path: &Utf8Path) -> Result<Self, StoreError> {
        match bucketlist_fs::read_file(path) {
            Ok(bytes) => <[u8; KEY_LEN]>::try_from(bytes.as_slice())
                .map(Self)
                .map_err(|_| StoreError::KeyLength {
                    path: path.to_path_buf(),
                    found: bytes.len(),
                    expected: KEY_LEN,
                }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let key = Self::generate();
                bucketlist_fs::write_atomic(path, &key.0).map_err(|source| {
                    StoreError::KeyWrite {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                debug!("created session key at {path}");
                Ok(key)
            }
            Err(source) => Err(StoreError::KeyRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn cipher(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(Key::from_slice(&self.0))
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(<redacted>)")
    }
}
