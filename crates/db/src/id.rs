use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

const ID_LEN: usize = 12;

/// Raised when a string is not a 24-character hexadecimal document id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid book id `{0}`")]
pub struct InvalidBookId(pub String);

/// Store-generated document identifier, wire-compatible with 12-byte ObjectIds.
///
/// Layout: 4-byte big-endian creation seconds, 5 random bytes, 3-byte counter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId([u8; ID_LEN]);

impl BookId {
    pub fn generate() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX))
            .unwrap_or_default();
        let random = Uuid::new_v4();
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; ID_LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&random.as_bytes()[..5]);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse a 24-character hex string; anything else is rejected.
    pub fn parse(raw: &str) -> Result<Self, InvalidBookId> {
        let mut bytes = [0u8; ID_LEN];
        hex::decode_to_slice(raw, &mut bytes).map_err(|_| InvalidBookId(raw.to_string()))?;
        Ok(Self(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookId({self})")
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
