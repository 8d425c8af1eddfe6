//! Project scaffolding for Butano GBA games.
//!
//! The `create` flow copies a Butano template into a fresh directory, overlays
//! the bundled starter program, renames template tokens, and writes a Makefile
//! pointing back at the Butano installation. `doctor` inspects the toolchain.
//! Terminal concerns (argument parsing, prompts, colour) live in the binary;
//! this crate talks to the user only through [`prompt::Prompter`] and
//! [`report::Reporter`].

pub mod butano;
pub mod config;
pub mod create;
pub mod deps;
pub mod doctor;
pub mod error;
pub mod exec;
pub mod git;
pub mod makefile;
pub mod paths;
pub mod prompt;
pub mod report;
pub mod rom;
pub mod starter;
pub mod template;

pub use error::{Error, Result};
