// src/editor/commands.rs

use crate::profile::{BrushButtons, ResizeControls};
use crate::utils::ScreenPoint;
use serde::Serialize;
use std::fmt;

/// The key that moves the editor's elevation cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationKey {
    Raise,
    Lower,
}

impl ElevationKey {
    pub fn symbol(&self) -> char {
        match self {
            ElevationKey::Raise => '+',
            ElevationKey::Lower => '-',
        }
    }
}

/// One of the eight viewport resize buttons. The `2` variants act on the
/// opposite edge of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeControl {
    HorizontalPlus,
    HorizontalMinus,
    HorizontalPlus2,
    HorizontalMinus2,
    VerticalPlus,
    VerticalMinus,
    VerticalPlus2,
    VerticalMinus2,
}

impl ResizeControl {
    pub fn position(&self, controls: &ResizeControls) -> ScreenPoint {
        match self {
            ResizeControl::HorizontalPlus => controls.horizontal_plus,
            ResizeControl::HorizontalMinus => controls.horizontal_minus,
            ResizeControl::HorizontalPlus2 => controls.horizontal_plus2,
            ResizeControl::HorizontalMinus2 => controls.horizontal_minus2,
            ResizeControl::VerticalPlus => controls.vertical_plus,
            ResizeControl::VerticalMinus => controls.vertical_minus,
            ResizeControl::VerticalPlus2 => controls.vertical_plus2,
            ResizeControl::VerticalMinus2 => controls.vertical_minus2,
        }
    }
}

/// Side length of a square brush, in map squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BrushSize {
    One,
    Three,
    Seven,
    Fifteen,
}

impl BrushSize {
    /// Sizes tried by the grouper, largest first. Size one takes what is left.
    pub const DESCENDING_BLOCKS: [BrushSize; 3] = [BrushSize::Fifteen, BrushSize::Seven, BrushSize::Three];

    /// The order in which brush groups are painted.
    pub const PAINT_ORDER: [BrushSize; 4] = [BrushSize::One, BrushSize::Three, BrushSize::Seven, BrushSize::Fifteen];

    pub fn side(&self) -> i64 {
        match self {
            BrushSize::One => 1,
            BrushSize::Three => 3,
            BrushSize::Seven => 7,
            BrushSize::Fifteen => 15,
        }
    }

    pub fn selector(&self, buttons: &BrushButtons) -> ScreenPoint {
        match self {
            BrushSize::One => buttons.brush_1,
            BrushSize::Three => buttons.brush_3,
            BrushSize::Seven => buttons.brush_7,
            BrushSize::Fifteen => buttons.brush_15,
        }
    }
}

/// What a click lands on. Carried alongside the screen point so action
/// scripts and logs stay readable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickTarget {
    /// A viewport-local map square.
    Cell { x: i64, y: i64 },
    Brush { side: i64 },
    Menu { label: String },
    Resize { control: ResizeControl },
}

/// A single input event for the scenario editor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Click { at: ScreenPoint, target: ClickTarget },
    Key { key: ElevationKey },
}

impl Action {
    pub fn click(at: ScreenPoint, target: ClickTarget) -> Self {
        Action::Click { at, target }
    }

    pub fn key(key: ElevationKey) -> Self {
        Action::Key { key }
    }

    pub fn is_click(&self) -> bool {
        matches!(self, Action::Click { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Click { at, target } => {
                write!(f, "click ({}, {}) ", at.x, at.y)?;
                match target {
                    ClickTarget::Cell { x, y } => write!(f, "on square ({}, {})", x, y),
                    ClickTarget::Brush { side } => write!(f, "on brush {}", side),
                    ClickTarget::Menu { label } => write!(f, "on menu '{}'", label),
                    ClickTarget::Resize { control } => write!(f, "on {:?}", control),
                }
            }
            Action::Key { key } => write!(f, "press '{}'", key.symbol()),
        }
    }
}
