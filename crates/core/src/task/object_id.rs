//! Store-assigned record identifiers
//!
//! An `ObjectId` is 12 bytes: a 4-byte big-endian Unix timestamp, 5 bytes
//! unique to the process and a 3-byte big-endian counter. Externally it is
//! rendered as 24 lowercase hex characters.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const OBJECT_ID_LEN: usize = 12;
const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdError {
    #[error("expected 24 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        let timestamp = Utc::now().timestamp() as u32;
        let process = PROCESS_UNIQUE.get_or_init(|| {
            let mut bytes = [0u8; 5];
            rand::thread_rng().fill(&mut bytes);
            bytes
        });
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..=COUNTER_MASK)))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != OBJECT_ID_LEN * 2 {
            return Err(ObjectIdError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; OBJECT_ID_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|err| ObjectIdError::InvalidHex(err.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let first = ObjectId::new();
        let second = ObjectId::new();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hex_form_is_24_lowercase_chars() {
        let id = ObjectId::new();
        let hex = id.to_string();
        assert_eq!(hex.len(), 24);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(hex.parse::<ObjectId>().unwrap(), id);
    }

    #[test]
    fn test_timestamp_prefix() {
        let before = Utc::now().timestamp() as u32;
        let id = ObjectId::new();
        let after = Utc::now().timestamp() as u32;
        let embedded = u32::from_str_radix(&id.to_hex()[..8], 16).unwrap();
        assert!(embedded >= before && embedded <= after);
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert_eq!(
            "abc".parse::<ObjectId>(),
            Err(ObjectIdError::InvalidLength(3))
        );
        assert!(matches!(
            "zzzzzzzzzzzzzzzzzzzzzzzz".parse::<ObjectId>(),
            Err(ObjectIdError::InvalidHex(_))
        ));
        assert_eq!(
            "000000000000000000000000".parse::<ObjectId>().unwrap(),
            ObjectId::from_bytes([0; 12])
        );
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let id = ObjectId::from_bytes([0xab; 12]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abababababababababababab\"");
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ObjectId>("\"nothex\"").is_err());
    }
}
