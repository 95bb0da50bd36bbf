//! Login password generation and sealing.
//!
//! A created instance's password is returned to the caller sealed with
//! AES-256-GCM. The key is SHA-256 of `guid ‖ seed`, so only a holder of
//! the record's seed can open it. The sealed form is
//! `base64(nonce ‖ ciphertext ‖ tag)`.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use stratus_core::SecureString;

const NONCE_LEN: usize = 12;
const PASSWORD_LEN: usize = 16;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";
const SPECIAL: &[u8] = b"!@#$%^&*()-_=+";

/// Password sealing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    /// The derived key has the wrong length.
    #[error("password sealing key is invalid")]
    Key,
    /// Encryption failed.
    #[error("password encryption failed")]
    Seal,
    /// The sealed value is not valid base64 or is too short.
    #[error("sealed password is malformed")]
    Malformed,
    /// Wrong key, or the sealed value was tampered with.
    #[error("sealed password could not be opened")]
    Open,
}

/// Generate a password with at least one character of every class.
pub fn generate_password() -> SecureString {
    let classes = [UPPER, LOWER, DIGITS, SPECIAL];
    let all: Vec<u8> = classes.concat();

    let mut chars: Vec<u8> = classes.iter().map(|class| pick(class)).collect();
    while chars.len() < PASSWORD_LEN {
        chars.push(pick(&all));
    }
    // Fisher-Yates, so the guaranteed characters are not always first.
    for i in (1..chars.len()).rev() {
        chars.swap(i, uniform(i + 1));
    }

    SecureString::new(chars.into_iter().map(char::from).collect::<String>())
}

/// Seal `password` under the key derived from `guid` and `seed`.
pub fn seal(
    guid: &str,
    seed: &SecureString,
    password: &SecureString,
) -> Result<String, SecretError> {
    let cipher = cipher(guid, seed)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, password.expose().as_bytes())
        .map_err(|_| SecretError::Seal)?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(sealed))
}

/// Reverse of [`seal`].
pub fn open(guid: &str, seed: &SecureString, sealed: &str) -> Result<SecureString, SecretError> {
    let bytes = STANDARD.decode(sealed).map_err(|_| SecretError::Malformed)?;
    if bytes.len() <= NONCE_LEN {
        return Err(SecretError::Malformed);
    }
    let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);

    let plaintext = cipher(guid, seed)?
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| SecretError::Open)?;
    String::from_utf8(plaintext)
        .map(SecureString::new)
        .map_err(|_| SecretError::Open)
}

fn cipher(guid: &str, seed: &SecureString) -> Result<Aes256Gcm, SecretError> {
    let key = Sha256::new()
        .chain_update(guid.as_bytes())
        .chain_update(seed.expose().as_bytes())
        .finalize();
    Aes256Gcm::new_from_slice(&key[..]).map_err(|_| SecretError::Key)
}

fn pick(class: &[u8]) -> u8 {
    class[uniform(class.len())]
}

/// Unbiased index in `0..n`.
fn uniform(n: usize) -> usize {
    let n = n as u64;
    let zone = u64::MAX - (u64::MAX % n);
    loop {
        let v = OsRng.next_u64();
        if v < zone {
            return (v % n) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn generated_password_covers_every_class() {
        for _ in 0..50 {
            let password = generate_password();
            let bytes = password.expose().as_bytes();
            assert_eq!(bytes.len(), PASSWORD_LEN);
            for class in [UPPER, LOWER, DIGITS, SPECIAL] {
                assert!(bytes.iter().any(|b| class.contains(b)), "{class:?}");
            }
        }
    }

    #[test]
    fn generated_passwords_differ() {
        assert_ne!(generate_password(), generate_password());
    }

    #[test]
    fn seal_then_open() {
        let seed = SecureString::new("seed-1");
        let password = SecureString::new("Pa55word!");

        let sealed = seal("g1", &seed, &password).unwrap();
        assert!(!sealed.contains("Pa55word"));
        assert_eq!(open("g1", &seed, &sealed).unwrap(), password);
    }

    #[test]
    fn sealing_is_randomized() {
        let seed = SecureString::new("seed-1");
        let password = SecureString::new("Pa55word!");
        assert_ne!(
            seal("g1", &seed, &password).unwrap(),
            seal("g1", &seed, &password).unwrap()
        );
    }

    #[test]
    fn wrong_guid_or_seed_cannot_open() {
        let seed = SecureString::new("seed-1");
        let sealed = seal("g1", &seed, &SecureString::new("x")).unwrap();

        assert_eq!(open("g2", &seed, &sealed), Err(SecretError::Open));
        assert_eq!(
            open("g1", &SecureString::new("seed-2"), &sealed),
            Err(SecretError::Open)
        );
    }

    #[test]
    fn malformed_input() {
        let seed = SecureString::default();
        assert_eq!(open("g1", &seed, "not base64!"), Err(SecretError::Malformed));
        assert_eq!(open("g1", &seed, "AAAA"), Err(SecretError::Malformed));
    }
}
