//! Fixed-salt bcrypt hashing for fixture credentials.
//!
//! Every user's password is the bcrypt hash of their username under one shared
//! salt. Identical usernames therefore produce identical hashes, across rows
//! and across runs. This keeps fixture logins predictable (log in as `name`
//! with password `name`) and must never be used outside fixture data.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};
use bcrypt::Version;

use crate::errors::GenerationError;

/// Salt shared by all generated users.
pub const FIXTURE_SALT: &str = "$2a$10$aV5BYihLxDi8FstQA4z8XO";

const BCRYPT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// bcrypt hasher bound to one salt and cost.
#[derive(Debug, Clone)]
pub struct FixtureHasher {
    cost: u32,
    salt: [u8; 16],
}

impl FixtureHasher {
    /// Parse a `$2a$<cost>$<22 salt chars>` prefix.
    pub fn parse(prefix: &str) -> Result<Self, GenerationError> {
        let mut parts = prefix.split('$');
        let (Some(""), Some(version), Some(cost), Some(salt), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(GenerationError::InvalidSalt(prefix.to_string()));
        };

        if !matches!(version, "2a" | "2b" | "2y") {
            return Err(GenerationError::InvalidSalt(format!(
                "unsupported bcrypt version '{version}'"
            )));
        }
        let cost = cost
            .parse::<u32>()
            .map_err(|_| GenerationError::InvalidSalt(format!("invalid cost '{cost}'")))?;
        if salt.len() != 22 {
            return Err(GenerationError::InvalidSalt(format!(
                "salt must be 22 characters, got {}",
                salt.len()
            )));
        }

        let bytes = BCRYPT_BASE64
            .decode(salt)
            .map_err(|err| GenerationError::InvalidSalt(err.to_string()))?;
        let salt: [u8; 16] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            GenerationError::InvalidSalt(format!("salt decodes to {} bytes", bytes.len()))
        })?;

        Ok(Self { cost, salt })
    }

    pub fn fixture() -> Result<Self, GenerationError> {
        Self::parse(FIXTURE_SALT)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, secret: &str) -> Result<String, GenerationError> {
        let parts = bcrypt::hash_with_salt(secret, self.cost, self.salt)?;
        Ok(parts.format_for_version(Version::TwoA))
    }
}
