//! ROM header metadata. The GBA header stores a 12-byte uppercase title and a
//! 4-byte game code.

use crate::prompt::Prompter;
use crate::Result;

pub const MAX_TITLE_LEN: usize = 12;
pub const CODE_LEN: usize = 4;

const FALLBACK_TITLE: &str = "GBA";
const FALLBACK_CODE: &str = "GAME";
const CODE_PAD: char = 'G';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomMetadata {
    pub title: String,
    pub code: String,
}

/// Values passed on the command line; either may be set on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomOverrides<'a> {
    pub title: Option<&'a str>,
    pub code: Option<&'a str>,
}

impl RomOverrides<'_> {
    fn is_empty(&self) -> bool {
        self.title.map_or(true, str::is_empty) && self.code.map_or(true, str::is_empty)
    }
}

/// Default title derived from a project id.
pub fn to_rom_title(project_id: &str) -> String {
    let cleaned: String = project_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    fallback_truncate(cleaned, FALLBACK_TITLE, MAX_TITLE_LEN)
}

/// Default code derived from a project id.
pub fn to_rom_code(project_id: &str) -> String {
    let cleaned: String = project_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    pad_code(cleaned)
}

/// Cleans a user-supplied title. Unlike [`to_rom_title`], inner spaces survive.
pub fn normalize_rom_title(value: &str) -> String {
    let cleaned: String = value
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    fallback_truncate(cleaned.trim().to_string(), FALLBACK_TITLE, MAX_TITLE_LEN)
}

pub fn normalize_rom_code(value: &str) -> String {
    let cleaned: String = value
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect();
    pad_code(cleaned)
}

fn fallback_truncate(value: String, fallback: &str, max_len: usize) -> String {
    let value = if value.is_empty() {
        fallback.to_string()
    } else {
        value
    };
    value.chars().take(max_len).collect()
}

fn pad_code(cleaned: String) -> String {
    let base = if cleaned.is_empty() {
        FALLBACK_CODE.to_string()
    } else {
        cleaned
    };
    base.chars()
        .chain(std::iter::repeat(CODE_PAD))
        .take(CODE_LEN)
        .collect()
}

/// Decides the ROM header for a new project. Returns `None` when the Makefile
/// should use the values derived from the project id.
pub fn resolve_rom_metadata(
    default_title: &str,
    default_code: &str,
    overrides: RomOverrides<'_>,
    non_interactive: bool,
    prompter: &mut dyn Prompter,
) -> Result<Option<RomMetadata>> {
    if !overrides.is_empty() {
        return Ok(Some(RomMetadata {
            title: normalize_rom_title(overrides.title.unwrap_or(default_title)),
            code: normalize_rom_code(overrides.code.unwrap_or(default_code)),
        }));
    }

    if non_interactive {
        return Ok(None);
    }

    if !prompter.confirm("Set ROM metadata (title/code)?", false)? {
        return Ok(None);
    }

    let title = prompter.text("ROM title", Some(default_title))?;
    let code = prompter.text("ROM code", Some(default_code))?;
    Ok(Some(RomMetadata {
        title: normalize_rom_title(&title),
        code: normalize_rom_code(&code),
    }))
}
