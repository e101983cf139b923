//! Versioned MessagePack frames of a leaderboard for the sync layer.
//!
//! Frame layout: one version byte followed by the MessagePack payload.

use sha2::{Digest, Sha256};

use crate::ranking::Standings;

/// Current snapshot frame version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Maximum encoded frame size in bytes.
pub const MAX_SNAPSHOT_SIZE: usize = 64 * 1024; // 64 KiB

#[derive(Debug)]
pub enum SnapshotError {
    Empty,
    UnsupportedVersion(u8),
    PayloadTooLarge(usize),
    SerializeError(String),
    DeserializeError(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty snapshot"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported snapshot version: {v}"),
            Self::PayloadTooLarge(size) => {
                write!(
                    f,
                    "snapshot too large: {size} bytes (max {MAX_SNAPSHOT_SIZE})"
                )
            },
            Self::SerializeError(e) => write!(f, "serialize error: {e}"),
            Self::DeserializeError(e) => write!(f, "deserialize error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

pub fn encode_standings(standings: &Standings) -> Result<Vec<u8>, SnapshotError> {
    let payload =
        rmp_serde::to_vec(standings).map_err(|e| SnapshotError::SerializeError(e.to_string()))?;
    let total = 1 + payload.len();
    if total > MAX_SNAPSHOT_SIZE {
        return Err(SnapshotError::PayloadTooLarge(total));
    }
    let mut buf = Vec::with_capacity(total);
    buf.push(SNAPSHOT_VERSION);
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub fn decode_standings(data: &[u8]) -> Result<Standings, SnapshotError> {
    let (&version, payload) = data.split_first().ok_or(SnapshotError::Empty)?;
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }
    if data.len() > MAX_SNAPSHOT_SIZE {
        return Err(SnapshotError::PayloadTooLarge(data.len()));
    }
    rmp_serde::from_slice(payload).map_err(|e| SnapshotError::DeserializeError(e.to_string()))
}

impl Standings {
    /// Hex SHA-256 of the encoded snapshot. Equal histories give equal fingerprints.
    pub fn fingerprint(&self) -> Result<String, SnapshotError> {
        let frame = encode_standings(self)?;
        Ok(hex::encode(Sha256::digest(&frame)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::config::EngineConfig;
    use crate::ranking::ScoreField;
    use crate::replay::standings;
    use crate::test_helpers::make_round;

    fn sample() -> Standings {
        let rounds = vec![
            make_round(1, 2, &[1, 3], vec![]),
            make_round(2, 1, &[2], vec![Card::attack(1, 1, 3), Card::defense(2, 1)]),
        ];
        standings(&rounds, &EngineConfig::default(), ScoreField::Total)
    }

    #[test]
    fn frame_starts_with_version_byte() {
        let frame = encode_standings(&sample()).unwrap();
        assert_eq!(frame[0], SNAPSHOT_VERSION);
        assert_eq!(decode_standings(&frame).unwrap(), sample());
    }

    #[test]
    fn rejects_empty_and_unknown_versions() {
        assert!(matches!(decode_standings(&[]), Err(SnapshotError::Empty)));
        let mut frame = encode_standings(&sample()).unwrap();
        frame[0] = 9;
        assert!(matches!(
            decode_standings(&frame),
            Err(SnapshotError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let frame = encode_standings(&sample()).unwrap();
        assert!(matches!(
            decode_standings(&frame[..frame.len() / 2]),
            Err(SnapshotError::DeserializeError(_))
        ));
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let a = sample().fingerprint().unwrap();
        let b = sample().fingerprint().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut changed = sample();
        changed.teams[0].total_score += 1;
        assert_ne!(changed.fingerprint().unwrap(), a);
    }
}
