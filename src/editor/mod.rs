// src/editor/mod.rs

pub mod brush;
pub mod commands;
mod core;
pub mod elevation;
pub mod pages;
pub mod terrain;

pub use brush::{group_brushes, BrushBlock, BrushGroup, BrushPlan};
pub use commands::{Action, BrushSize, ClickTarget, ElevationKey, ResizeControl};
pub use self::core::{RunOptions, RunSummary, Session};
pub use elevation::{sequence_elevation, ElevatedSquare, ElevationPass};
pub use pages::{Page, PagePlan, ResizeMode, ResizeStep, ViewportSize};
pub use terrain::{paint_terrain, TerrainSquare};
