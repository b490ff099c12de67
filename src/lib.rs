// src/lib.rs

pub mod document;
pub mod editor;
pub mod error;
pub mod map;
pub mod platform;
pub mod profile;
pub mod ui;
pub mod utils;

pub use error::{AutopaintError, Result};
