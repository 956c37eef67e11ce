//! Load master tables and fleet snapshots from JSON.

use super::{GearMaster, MasterTable, ShipMaster};
use crate::config::{EstimatorConfig, MAX_MASTER_FILE_BYTES, MAX_SNAPSHOT_SHIPS};
use crate::estimate::FleetSnapshot;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MasterDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: usize },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {table} id {id}")]
    DuplicateId { table: &'static str, id: i64 },
    #[error("fleet snapshot has {count} ships (max {max})")]
    SnapshotTooLarge { count: usize, max: usize },
}

/// Master document layout: the game's `api_mst_*` arrays plus a separate abyssal ship table.
#[derive(Debug, Deserialize)]
struct MasterDocument {
    #[serde(default)]
    api_mst_ship: Vec<ShipMaster>,
    #[serde(default)]
    api_mst_slotitem: Vec<GearMaster>,
    #[serde(default)]
    abyssal_ships: Vec<ShipMaster>,
}

/// Size is checked from metadata before the file is read.
fn read_bounded(path: &Path) -> Result<String, MasterDataError> {
    let io_err = |source| MasterDataError::Io {
        path: path.display().to_string(),
        source,
    };
    let size = fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_MASTER_FILE_BYTES as u64 {
        return Err(MasterDataError::TooLarge {
            size,
            max: MAX_MASTER_FILE_BYTES,
        });
    }
    fs::read_to_string(path).map_err(io_err)
}

/// Build a master table from a JSON document. Duplicate IDs within one table are rejected.
pub fn master_table_from_json(
    content: &str,
    cfg: &EstimatorConfig,
) -> Result<MasterTable, MasterDataError> {
    let doc: MasterDocument = serde_json::from_str(content)?;
    let mut table = MasterTable::new(cfg.abyssal_id_threshold);
    tracing::debug!("abyssal ship ids above {}", table.abyssal_id_threshold());
    for s in doc.api_mst_ship {
        let id = s.id;
        if table.insert_ship(s).is_some() {
            return Err(MasterDataError::DuplicateId { table: "ship", id });
        }
    }
    for s in doc.abyssal_ships {
        let id = s.id;
        if table.insert_abyssal_ship(s).is_some() {
            return Err(MasterDataError::DuplicateId {
                table: "abyssal ship",
                id,
            });
        }
    }
    for g in doc.api_mst_slotitem {
        let id = g.id;
        if table.insert_gear(g).is_some() {
            return Err(MasterDataError::DuplicateId { table: "slotitem", id });
        }
    }
    let (ships, abyssal, gears) = table.counts();
    tracing::debug!(
        "master data: {} ship(s), {} abyssal ship(s), {} slotitem(s)",
        ships,
        abyssal,
        gears
    );
    Ok(table)
}

pub fn load_master_table(
    path: &Path,
    cfg: &EstimatorConfig,
) -> Result<MasterTable, MasterDataError> {
    let content = read_bounded(path)?;
    master_table_from_json(&content, cfg)
}

pub fn load_fleet_snapshot(path: &Path) -> Result<FleetSnapshot, MasterDataError> {
    let content = read_bounded(path)?;
    let snapshot: FleetSnapshot = serde_json::from_str(&content)?;
    let count = snapshot.ship_ids.as_ref().map(Vec::len).unwrap_or(0);
    if count > MAX_SNAPSHOT_SHIPS {
        return Err(MasterDataError::SnapshotTooLarge {
            count,
            max: MAX_SNAPSHOT_SHIPS,
        });
    }
    Ok(snapshot)
}
