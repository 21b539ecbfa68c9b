//! Reading and writing the whole location list.

use std::io;

use bucketlist_core::Location;

use super::{FileProtection, StoreConfig, StoreError, seal};

impl FileProtection {
    fn seal(&self, payload: Vec<u8>) -> Result<Vec<u8>, StoreError> {
        match self {
            Self::None => Ok(payload),
            Self::Complete(key) => Ok(seal::seal(key, &payload)?),
        }
    }

    fn unseal(&self, config: &StoreConfig, bytes: Vec<u8>) -> Result<Vec<u8>, StoreError> {
        match self {
            Self::None => Ok(bytes),
            Self::Complete(key) => {
                seal::unseal(key, &bytes).map_err(|source| StoreError::Unseal {
                    path: config.path.clone(),
                    source,
                })
            }
        }
    }
}

/// Load the saved list. `Ok(None)` means no file exists yet.
pub(super) fn load(config: &StoreConfig) -> Result<Option<Vec<Location>>, StoreError> {
    let bytes = match bucketlist_fs::read_file(&config.path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Read {
                path: config.path.clone(),
                source,
            });
        }
    };
    let payload = config.protection.unseal(config, bytes)?;
    serde_json::from_slice(&payload)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            path: config.path.clone(),
            source,
        })
}

/// Replace the store file with `locations`.
pub(super) fn save(config: &StoreConfig, locations: &[Location]) -> Result<(), StoreError> {
    let payload = serde_json::to_vec(locations).map_err(|source| StoreError::Encode { source })?;
    let bytes = config.protection.seal(payload)?;
    bucketlist_fs::write_atomic(&config.path, &bytes).map_err(|source| StoreError::Write {
        path: config.path.clone(),
        source,
    })
}
