//! Serialization utilities for grid snapshots.

use crate::world::GridSnapshot;

/// Serialize a snapshot to JSON bytes.
pub fn snapshot_to_json(snapshot: &GridSnapshot) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(snapshot)
}

/// Serialize a snapshot to a JSON string.
pub fn snapshot_to_json_string(snapshot: &GridSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// Deserialize a snapshot from JSON bytes.
pub fn snapshot_from_json(data: &[u8]) -> Result<GridSnapshot, serde_json::Error> {
    serde_json::from_slice(data)
}

/// Deserialize a snapshot from a JSON string.
pub fn snapshot_from_json_string(data: &str) -> Result<GridSnapshot, serde_json::Error> {
    serde_json::from_str(data)
}
