// src/utils/mod.rs
pub mod geometry;

pub use geometry::{GridRect, ScreenPoint};
