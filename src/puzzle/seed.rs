//! Date-derived puzzle seeds.
//!
//! The seed is the SHA-256 digest of `"<prefix>-<YYYY-MM-DD>"`, read as one
//! 256-bit big-endian unsigned integer. Index arithmetic reduces that integer
//! exactly, so no big-integer type is needed.

use std::fmt;
use std::num::NonZeroUsize;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// 256-bit seed for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySeed([u8; 32]);

impl DailySeed {
    /// Seed for `date` under the given application prefix.
    pub fn new(prefix: &str, date: NaiveDate) -> Self {
        Self::from_key(&format!("{}-{}", prefix, date.format("%Y-%m-%d")))
    }

    /// Seed for an arbitrary key string.
    pub fn from_key(key: &str) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        DailySeed(bytes)
    }

    /// Digest bytes, most significant first.
    pub fn bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `(seed + offset) mod modulus`, computed over the full 256-bit seed.
    pub fn offset_mod(&self, offset: u128, modulus: NonZeroUsize) -> usize {
        let m = modulus.get() as u128;
        let residue = self
            .0
            .iter()
            .fold(0u128, |acc, &byte| (acc * 256 + byte as u128) % m);
        ((residue + offset % m) % m) as usize
    }
}

impl fmt::Display for DailySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
