// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{BoardFile, RawBoardFile};
use crate::errors::Result;

/// Read a board file and return the raw `RawBoardFile`.
///
/// This only performs TOML deserialization; it does **not** check
/// dependency references or cycles. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawBoardFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let board: RawBoardFile = toml::from_str(&contents)?;
    Ok(board)
}

/// Read a board file and validate it.
///
/// Checks for:
/// - unknown `after` references and self-dependencies,
/// - dependency cycles,
/// - view sanity (`row_capacity >= 1`, finite sizes, fit padding range).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<BoardFile> {
    let raw = load_from_path(&path)?;
    BoardFile::try_from(raw)
}

/// `Taskdag.toml` in the current working directory.
pub fn default_board_path() -> PathBuf {
    PathBuf::from("Taskdag.toml")
}
