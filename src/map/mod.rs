// src/map/mod.rs
pub mod cell;

pub use cell::{Cell, CellRecord, TerrainLabels};
