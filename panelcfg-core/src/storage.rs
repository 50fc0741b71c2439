//! Binary setup storage
//!
//! A setup is written to flash as a postcard-encoded record carrying a
//! format version, so a stale record from an older image is rejected
//! instead of being misread.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SetupDescriptor;

/// Current storage format version
pub const STORAGE_VERSION: u8 = 1;

/// Upper bound on an encoded record
pub const MAX_ENCODED_SIZE: usize = 96;

/// Storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Record was written by another format version
    VersionMismatch { found: u8 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Serialize => write!(f, "failed to encode setup"),
            StorageError::Deserialize => write!(f, "failed to decode setup"),
            StorageError::VersionMismatch { found } => write!(
                f,
                "setup record version {found}, expected {STORAGE_VERSION}"
            ),
        }
    }
}

impl core::error::Error for StorageError {}

#[derive(Serialize, Deserialize)]
struct Record {
    version: u8,
    setup: SetupDescriptor,
}

/// Encode a setup into `buf`, returning the used part
pub fn encode<'a>(setup: &SetupDescriptor, buf: &'a mut [u8]) -> Result<&'a mut [u8], StorageError> {
    let record = Record {
        version: STORAGE_VERSION,
        setup: *setup,
    };
    postcard::to_slice(&record, buf).map_err(|_| StorageError::Serialize)
}

/// Decode a setup previously written by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<SetupDescriptor, StorageError> {
    // Version is the first field; check it before trusting the rest
    let version = *bytes.first().ok_or(StorageError::Deserialize)?;
    if version != STORAGE_VERSION {
        return Err(StorageError::VersionMismatch { found: version });
    }

    let record: Record = postcard::from_bytes(bytes).map_err(|_| StorageError::Deserialize)?;
    Ok(record.setup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ESP32_035_ST7796;

    #[test]
    fn test_encode_decode() {
        let mut buf = [0u8; MAX_ENCODED_SIZE];
        let len = encode(&ESP32_035_ST7796, &mut buf).unwrap().len();
        assert!(len < MAX_ENCODED_SIZE);
        assert_eq!(buf[0], STORAGE_VERSION);

        let setup = decode(&buf[..len]).unwrap();
        assert_eq!(setup, ESP32_035_ST7796);
    }

    #[test]
    fn test_version_mismatch() {
        let mut buf = [0u8; MAX_ENCODED_SIZE];
        let len = encode(&ESP32_035_ST7796, &mut buf).unwrap().len();
        buf[0] = 7;
        assert_eq!(
            decode(&buf[..len]),
            Err(StorageError::VersionMismatch { found: 7 })
        );
    }

    #[test]
    fn test_truncated_record() {
        let mut buf = [0u8; MAX_ENCODED_SIZE];
        let len = encode(&ESP32_035_ST7796, &mut buf).unwrap().len();
        assert_eq!(decode(&buf[..len / 2]), Err(StorageError::Deserialize));
        assert_eq!(decode(&[]), Err(StorageError::Deserialize));
    }

    #[test]
    fn test_unknown_driver_bit_rejected() {
        let mut buf = [0u8; MAX_ENCODED_SIZE];
        let len = encode(&ESP32_035_ST7796, &mut buf).unwrap().len();

        // version, setup_id 123, platform 0, then the driver set varint (1 << 7)
        assert_eq!(&buf[3..5], &[0x80, 0x01]);
        // same width varint, but bit 12 names no driver
        buf[4] = 0x20;
        assert_eq!(decode(&buf[..len]), Err(StorageError::Deserialize));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 4];
        assert_eq!(
            encode(&ESP32_035_ST7796, &mut buf).map(|b| b.len()),
            Err(StorageError::Serialize)
        );
    }
}
