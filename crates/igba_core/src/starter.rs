//! The program every new project starts from: initialise Butano, draw
//! "Hello world!" with the shared 8x8 sprite font, then update forever.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const STARTER_MAIN_CPP: &str = include_str!("../assets/basic-template/src/main.cpp");

/// Writes the starter program to `<target>/src/main.cpp`, replacing any
/// template-provided entry point of the same name.
pub fn write_starter(target_dir: &Path) -> Result<PathBuf> {
    let src_dir = target_dir.join("src");
    fs::create_dir_all(&src_dir).map_err(|e| Error::io("Failed to create directory", &src_dir, e))?;
    let path = src_dir.join("main.cpp");
    fs::write(&path, STARTER_MAIN_CPP).map_err(|e| Error::io("Failed to write", &path, e))?;
    Ok(path)
}
