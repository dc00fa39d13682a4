//! Password Hashing
//!
//! Argon2id with the crate's default parameters (m=19456, t=2, p=1) and a
//! random 128-bit salt per hash. An optional pepper is appended to the
//! password bytes before hashing and must be supplied again to verify.
//!
//! Clear-text material is wiped from memory when dropped.
//!
//! ```rust
//! use platform::password::{Credential, hash_password, verify_password};
//!
//! let credential = Credential::parse("password1".to_string()).unwrap();
//! let stored = hash_password(&credential, None).unwrap();
//! assert!(verify_password(&credential, &stored, None));
//! ```

use std::fmt;
use std::sync::LazyLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Fewest code points accepted after normalization
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Most code points accepted after normalization
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Why a candidate password was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password is blank")]
    Blank,

    #[error("password has {0} characters, fewer than {min}", min = MIN_PASSWORD_LENGTH)]
    TooShort(usize),

    #[error("password has {0} characters, more than {max}", max = MAX_PASSWORD_LENGTH)]
    TooLong(usize),

    #[error("password contains control characters")]
    ControlCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("argon2 hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),

    #[error("stored value is not a PHC hash string")]
    Malformed,
}

/// NFKC-normalized clear-text password that passed the length policy
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    pub fn parse(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let candidate = Self(raw.nfkc().collect());

        if candidate.0.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        match candidate.0.chars().count() {
            n if n < MIN_PASSWORD_LENGTH => return Err(PasswordPolicyError::TooShort(n)),
            n if n > MAX_PASSWORD_LENGTH => return Err(PasswordPolicyError::TooLong(n)),
            _ => {}
        }

        // Tab and newline are the only control characters a user can type
        if candidate
            .0
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\t' | '\n'))
        {
            return Err(PasswordPolicyError::ControlCharacter);
        }

        Ok(candidate)
    }

    fn with_pepper(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut input = Zeroizing::new(self.0.as_bytes().to_vec());
        input.extend_from_slice(pepper.unwrap_or_default());
        input
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Argon2id PHC string, the only form a password is persisted in
#[derive(Clone, PartialEq, Eq)]
pub struct StoredHash(String);

impl StoredHash {
    /// Accept a value read from storage if it parses as a PHC string
    pub fn parse(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::Malformed)?;
        Ok(Self(phc))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StoredHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoredHash([HASH])")
    }
}

pub fn hash_password(
    credential: &Credential,
    pepper: Option<&[u8]>,
) -> Result<StoredHash, PasswordHashError> {
    let salt = SaltString::generate(OsRng);
    let phc = Argon2::default()
        .hash_password(&credential.with_pepper(pepper), &salt)
        .map_err(PasswordHashError::Hashing)?;

    Ok(StoredHash(phc.to_string()))
}

/// Constant-time check of `credential` against `stored`
pub fn verify_password(credential: &Credential, stored: &StoredHash, pepper: Option<&[u8]>) -> bool {
    PasswordHash::new(&stored.0).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(&credential.with_pepper(pepper), &parsed)
            .is_ok()
    })
}

static DECOY: LazyLock<Option<StoredHash>> = LazyLock::new(|| {
    let decoy = Credential(String::from("decoy-credential-for-unknown-accounts"));
    hash_password(&decoy, None).ok()
});

/// Spend one full verification on a throwaway hash and report no match
///
/// Used when the account does not exist so that the login path costs the
/// same whether or not the email is registered.
pub fn verify_against_decoy(credential: &Credential, pepper: Option<&[u8]>) -> bool {
    if let Some(decoy) = DECOY.as_ref() {
        let _ = verify_password(credential, decoy, pepper);
    }
    false
}
