// src/utils/geometry.rs
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A pixel position on the operator's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A half-open rectangle of grid squares, `[x.start, x.end) × [y.start, y.end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRect {
    pub x: Range<i64>,
    pub y: Range<i64>,
}

impl GridRect {
    pub fn new(x: Range<i64>, y: Range<i64>) -> Self {
        Self { x, y }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.x.contains(&x) && self.y.contains(&y)
    }
}
