// src/map/cell.rs
use crate::error::{AutopaintError, Result};
use serde::{Deserialize, Serialize};

/// Terrain labels attached to a cell, resolved against a profile's menu map.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerrainLabels {
    pub menu: Option<String>,
    pub cat1: Option<String>,
    pub cat2: Option<String>,
    pub direction: Option<String>,
}

impl TerrainLabels {
    pub fn is_empty(&self) -> bool {
        self.menu.is_none() && self.cat1.is_none() && self.cat2.is_none() && self.direction.is_none()
    }
}

/// One square of the logical grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    /// Elevation; negative values mean "leave unset".
    pub z: i64,
    pub labels: TerrainLabels,
    pub done: bool,
}

impl Cell {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self {
            x,
            y,
            z,
            labels: TerrainLabels::default(),
            done: false,
        }
    }

    pub fn with_labels(mut self, labels: TerrainLabels) -> Self {
        self.labels = labels;
        self
    }
}

/// Row layout of the cell table as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub menu: Option<String>,
    #[serde(default)]
    pub cat1: Option<String>,
    #[serde(default)]
    pub cat2: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub done: Option<i64>,
}

/// Converts an already rounded value, rejecting NaN, infinities and
/// anything outside the `i64` range.
fn grid_coordinate(column: &'static str, value: f64) -> Result<i64> {
    // 2^63; `i64::MAX` itself is not representable as f64.
    const LIMIT: f64 = i64::MAX as f64;
    if value.is_finite() && (-LIMIT..LIMIT).contains(&value) {
        Ok(value as i64)
    } else {
        Err(AutopaintError::InvalidCoordinate { column, value })
    }
}

impl TryFrom<CellRecord> for Cell {
    type Error = AutopaintError;

    fn try_from(record: CellRecord) -> Result<Self> {
        Ok(Cell {
            x: grid_coordinate("x", record.x.floor())?,
            y: grid_coordinate("y", record.y.floor())?,
            z: grid_coordinate("z", record.z.round_ties_even())?,
            labels: TerrainLabels {
                menu: record.menu,
                cat1: record.cat1,
                cat2: record.cat2,
                direction: record.direction,
            },
            done: record.done.unwrap_or(0) != 0,
        })
    }
}

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        CellRecord {
            x: cell.x as f64,
            y: cell.y as f64,
            z: cell.z as f64,
            menu: cell.labels.menu.clone(),
            cat1: cell.labels.cat1.clone(),
            cat2: cell.labels.cat2.clone(),
            direction: cell.labels.direction.clone(),
            done: Some(cell.done as i64),
        }
    }
}
