//! # Profiles and Screen Layout
//!
//! The scenario editor's geometry is described by two JSON documents:
//!
//! * the **screen layout**, shared by every profile: where the map squares are
//!   drawn, how large the viewport is, and where the resize and brush controls
//!   sit on screen;
//! * a **profile**, mapping menu labels ("Ground 1", "Grass", ...) to the
//!   screen positions of the matching menu entries.
//!
//! Built-in layouts and profiles live under `profiles/` and are embedded into
//! the binary. Both can be overridden with a JSON file on disk.

use crate::error::{AutopaintError, Result};
use crate::utils::ScreenPoint;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

static BUILTIN: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/profiles");

const LAYOUT_FILE: &str = "layout.json";
const MENUS_DIR: &str = "menus";

pub const DEFAULT_PROFILE: &str = "cold_war";

/// Viewport capacity and margins, measured in map squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportLayout {
    pub page_squares_x: i64,
    pub page_squares_y: i64,
    pub right_margin: i64,
    pub top_margin: i64,
    pub bottom_margin: i64,
    /// Size the editor shows for a freshly created map.
    pub start_squares_x: i64,
    pub start_squares_y: i64,
}

impl ViewportLayout {
    /// Novel squares per non-final page along x.
    pub fn usable_x(&self) -> i64 {
        self.page_squares_x - self.right_margin
    }

    /// Novel squares per non-final page along y.
    pub fn usable_y(&self) -> i64 {
        self.page_squares_y - self.top_margin - self.bottom_margin
    }

    pub fn validate(&self) -> Result<()> {
        if self.right_margin < 0 || self.top_margin < 0 || self.bottom_margin < 0 {
            return Err(AutopaintError::InvalidLayout("margins must not be negative".into()));
        }
        if self.usable_x() <= 0 || self.usable_y() <= 0 {
            return Err(AutopaintError::InvalidLayout(format!(
                "page of {}x{} squares leaves no room beside its margins",
                self.page_squares_x, self.page_squares_y
            )));
        }
        Ok(())
    }
}

/// Screen positions of the viewport resize buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeControls {
    pub horizontal_plus: ScreenPoint,
    pub horizontal_minus: ScreenPoint,
    pub horizontal_plus2: ScreenPoint,
    pub horizontal_minus2: ScreenPoint,
    pub vertical_plus: ScreenPoint,
    pub vertical_minus: ScreenPoint,
    pub vertical_plus2: ScreenPoint,
    pub vertical_minus2: ScreenPoint,
}

/// Screen positions of the brush size selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushButtons {
    pub brush_1: ScreenPoint,
    pub brush_3: ScreenPoint,
    pub brush_7: ScreenPoint,
    pub brush_15: ScreenPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayout {
    /// Width of one map square in pixels.
    pub square_size_x: f64,
    /// Height of one map square in pixels.
    pub square_size_y: f64,
    pub upper_left_square: ScreenPoint,
    pub lower_right_square: ScreenPoint,
    pub viewport: ViewportLayout,
    /// Elevation the editor's height cursor starts at.
    pub start_height: i64,
    pub resize: ResizeControls,
    pub brushes: BrushButtons,
}

impl ScreenLayout {
    pub fn builtin() -> Result<Self> {
        let file = BUILTIN
            .get_file(LAYOUT_FILE)
            .ok_or_else(|| AutopaintError::InvalidLayout(format!("missing built-in {}", LAYOUT_FILE)))?;
        Self::from_json(file.contents())
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let layout: ScreenLayout = serde_json::from_slice(bytes)?;
        layout.viewport.validate()?;
        Ok(layout)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read(path)?)
    }

    /// Screen position of the viewport-local square (x, y). Rows count
    /// upwards from the bottom edge of the viewport.
    pub fn cell_position(&self, x: i64, y: i64) -> ScreenPoint {
        let px = x as f64 * self.square_size_x + self.upper_left_square.x as f64;
        let py = self.lower_right_square.y as f64 - y as f64 * self.square_size_y;
        ScreenPoint::new(px as i32, py as i32)
    }
}

/// A named mapping from menu labels to screen positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub menu: BTreeMap<String, ScreenPoint>,
}

impl Profile {
    pub fn lookup(&self, label: &str) -> Option<ScreenPoint> {
        self.menu.get(label).copied()
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Resolves `name` as a built-in profile, or as a path to a JSON profile
    /// when it names an existing file.
    pub fn resolve(name: &str) -> Result<Self> {
        let path = Path::new(name);
        if path.is_file() {
            return Self::from_json(&fs::read(path)?);
        }
        Self::builtin(name)
    }

    pub fn builtin(name: &str) -> Result<Self> {
        let file = BUILTIN
            .get_file(format!("{}/{}.json", MENUS_DIR, name))
            .ok_or_else(|| AutopaintError::UnknownProfile(name.to_string()))?;
        Self::from_json(file.contents())
    }
}

/// Names of the profiles compiled into the binary, sorted.
pub fn available_profiles() -> Vec<String> {
    let mut names: Vec<String> = BUILTIN
        .get_dir(MENUS_DIR)
        .map(|dir| {
            dir.files()
                .filter_map(|file| file.path().file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
