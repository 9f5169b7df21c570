// src/config/mod.rs

//! Board files and gesture scripts.
//!
//! Responsibilities:
//! - Define the TOML-backed board model (`model.rs`).
//! - Load a board file from disk (`loader.rs`).
//! - Validate dependency references, cycles and view settings (`validate.rs`).
//! - Load gesture scripts for replay (`script.rs`).

pub mod loader;
pub mod model;
pub mod script;
pub mod validate;

pub use loader::{default_board_path, load_and_validate, load_from_path};
pub use model::{
    BoardFile, GridSection, LayoutSection, RawBoardFile, TaskEntry, TimingSection, ViewSection,
};
pub use script::{GestureScript, ScriptAction, ScriptStep, load_script};
