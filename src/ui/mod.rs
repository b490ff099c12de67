// src/ui/mod.rs
pub mod dialog;
pub mod form;

pub use dialog::{confirm, start_instructions, DialogResult};
pub use form::{run_form, FormValues};
