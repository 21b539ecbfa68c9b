//! Sealed envelope used when the store file is protected.
//!
//! Layout: the four magic bytes `BLSP`, a one-byte format version, a 24-byte
//! XChaCha20 nonce, then the Poly1305-authenticated ciphertext. A fresh
//! nonce is drawn for every write.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, AeadCore, OsRng},
};
use thiserror::Error;

use super::key::SessionKey;

/// File identifier for sealed store payloads.
pub const SEAL_MAGIC: [u8; 4] = *b"BLSP";

/// Supported version of the sealed payload format.
pub const SEAL_VERSION: u8 = 1;

const NONCE_LEN: usize = 24;

/// Error emitted when sealing or opening a protected payload.
#[derive(Debug, Error)]
pub enum SealError {
    /// The payload ended before the header was complete.
    #[error("sealed payload is truncated ({len} bytes)")]
    Truncated {
        /// Number of bytes available.
        len: usize,
    },
    /// The payload did not start with the expected header.
    #[error("invalid sealed payload magic: expected {expected:?}, found {found:?}")]
    InvalidMagic {
        /// Expected byte sequence identifying a sealed payload.
        expected: [u8; 4],
        /// Sequence read from the payload.
        found: [u8; 4],
    },
    /// The payload uses a format version this build cannot read.
    #[error("unsupported sealed payload version {found}; supported version is {supported}")]
    UnsupportedVersion {
        /// Version present in the header.
        found: u8,
        /// Latest version supported by this build.
        supported: u8,
    },
    /// The cipher refused to encrypt the payload.
    #[error("failed to encrypt payload")]
    Encrypt,
    /// Authentication failed: the key is wrong or the bytes were altered.
    #[error("failed to decrypt payload: wrong key or tampered data")]
    Decrypt,
}

/// Encrypt `plaintext` under `key` and frame it with the envelope header.
pub(crate) fn seal(key: &SessionKey, plaintext: &[u8]) -> Result<Vec<u8>, SealError> {
    let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
    let ciphertext = key
        .cipher()
        .encrypt(&nonce, plaintext)
        .map_err(|_| SealError::Encrypt)?;

    let mut sealed = Vec::with_capacity(SEAL_MAGIC.len() + 1 + NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&SEAL_MAGIC);
    sealed.push(SEAL_VERSION);
    sealed.extend_from_slice(nonce.as_slice());
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Validate the envelope header and decrypt the payload.
pub(crate) fn unseal(key: &SessionKey, sealed: &[u8]) -> Result<Vec<u8>, SealError> {
    let truncated = || SealError::Truncated { len: sealed.len() };

    let (magic, rest) = sealed.split_first_chunk::<4>().ok_or_else(truncated)?;
    if *magic != SEAL_MAGIC {
        return Err(SealError::InvalidMagic {
            expected: SEAL_MAGIC,
            found: *magic,
        });
    }
    let (&version, rest) = rest.split_first().ok_or_else(truncated)?;
    if version != SEAL_VERSION {
        return Err(SealError::UnsupportedVersion {
            found: version,
            supported: SEAL_VERSION,
        });
    }
    let (nonce, ciphertext) = rest.split_first_chunk::<NONCE_LEN>().ok_or_else(truncated)?;

    key.cipher()
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| SealError::Decrypt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn key() -> SessionKey {
        SessionKey::from_bytes([7; 32])
    }

    #[rstest]
    fn opens_what_it_sealed(key: SessionKey) {
        let plaintext = r#"[{"name":"Café"}]"#.as_bytes();
        let sealed = seal(&key, plaintext).expect("seal");
        assert_eq!(&sealed[..4], &SEAL_MAGIC);
        assert_eq!(sealed[4], SEAL_VERSION);
        let opened = unseal(&key, &sealed).expect("unseal");
        assert_eq!(opened, plaintext);
    }

    #[rstest]
    fn ciphertext_hides_plaintext(key: SessionKey) {
        let sealed = seal(&key, b"Buckingham Palace").expect("seal");
        let needle = b"Buckingham";
        assert!(
            !sealed.windows(needle.len()).any(|window| window == needle),
            "plaintext leaked into sealed payload"
        );
    }

    #[rstest]
    fn fresh_nonce_per_seal(key: SessionKey) {
        let first = seal(&key, b"[]").expect("seal");
        let second = seal(&key, b"[]").expect("seal");
        assert_ne!(first, second);
    }

    #[rstest]
    fn wrong_key_fails_to_open(key: SessionKey) {
        let sealed = seal(&key, b"[]").expect("seal");
        let other = SessionKey::from_bytes([8; 32]);
        let err = unseal(&other, &sealed).expect_err("wrong key should fail");
        assert!(matches!(err, SealError::Decrypt));
    }

    #[rstest]
    fn tampered_payload_fails_to_open(key: SessionKey) {
        let mut sealed = seal(&key, b"[]").expect("seal");
        if let Some(last) = sealed.last_mut() {
            *last ^= 0x01;
        }
        let err = unseal(&key, &sealed).expect_err("tampering should fail");
        assert!(matches!(err, SealError::Decrypt));
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"BLS".as_slice())]
    #[case(b"BLSP".as_slice())]
    #[case(b"BLSP\x01short-nonce".as_slice())]
    fn short_input_is_truncated(key: SessionKey, #[case] input: &[u8]) {
        let err = unseal(&key, input).expect_err("short input should fail");
        assert!(matches!(err, SealError::Truncated { len } if len == input.len()));
    }

    #[rstest]
    fn plain_json_has_invalid_magic(key: SessionKey) {
        let err = unseal(&key, b"[{\"id\":1}]").expect_err("plain JSON is not sealed");
        assert!(matches!(err, SealError::InvalidMagic { found, .. } if &found == b"[{\"i"));
    }

    #[rstest]
    fn future_version_is_rejected(key: SessionKey) {
        let mut sealed = seal(&key, b"[]").expect("seal");
        sealed[4] = SEAL_VERSION + 1;
        let err = unseal(&key, &sealed).expect_err("unknown version should fail");
        assert!(matches!(
            err,
            SealError::UnsupportedVersion { found, supported }
                if found == SEAL_VERSION + 1 && supported == SEAL_VERSION
        ));
    }
}
