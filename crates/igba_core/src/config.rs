use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_BUTANO_REPO: &str = "https://github.com/GValiente/butano.git";
pub const DEFAULT_TEMPLATE_TOKEN: &str = "template";

/// Process environment captured once at startup so the rest of the crate can
/// be driven deterministically from tests.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub home: Option<PathBuf>,
    pub butano_path: Option<String>,
    pub devkitpro: Option<String>,
    pub devkitarm: Option<String>,
    pub no_color: bool,
}

impl Environment {
    pub fn capture() -> Self {
        let home = non_empty_var("HOME")
            .or_else(|| non_empty_var("USERPROFILE"))
            .map(PathBuf::from);
        Self {
            home,
            butano_path: non_empty_var("BUTANO_PATH"),
            devkitpro: non_empty_var("DEVKITPRO"),
            devkitarm: non_empty_var("DEVKITARM"),
            no_color: env::var_os("NO_COLOR").is_some(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Every knob of `create`. Loaded from an optional JSON file, then overlaid
/// with command-line flags via [`CreateOptions::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateOptions {
    pub name: Option<String>,
    pub dir: Option<String>,
    pub butano_path: Option<String>,
    pub butano_repo: Option<String>,
    pub template_path: Option<String>,
    pub template_token: Option<String>,
    pub rom_title: Option<String>,
    pub rom_code: Option<String>,
    pub force: bool,
    pub non_interactive: bool,
    pub yes: bool,
    pub skip_deps: bool,
    pub skip_git: bool,
    pub skip_makefile: bool,
    pub skip_update: bool,
}

impl CreateOptions {
    pub fn butano_repo(&self) -> &str {
        self.butano_repo.as_deref().unwrap_or(DEFAULT_BUTANO_REPO)
    }

    pub fn template_token(&self) -> &str {
        self.template_token
            .as_deref()
            .unwrap_or(DEFAULT_TEMPLATE_TOKEN)
    }

    /// Values set in `flags` win; booleans are enabled by either side.
    pub fn overlay(self, flags: CreateOptions) -> CreateOptions {
        CreateOptions {
            name: flags.name.or(self.name),
            dir: flags.dir.or(self.dir),
            butano_path: flags.butano_path.or(self.butano_path),
            butano_repo: flags.butano_repo.or(self.butano_repo),
            template_path: flags.template_path.or(self.template_path),
            template_token: flags.template_token.or(self.template_token),
            rom_title: flags.rom_title.or(self.rom_title),
            rom_code: flags.rom_code.or(self.rom_code),
            force: flags.force || self.force,
            non_interactive: flags.non_interactive || self.non_interactive,
            yes: flags.yes || self.yes,
            skip_deps: flags.skip_deps || self.skip_deps,
            skip_git: flags.skip_git || self.skip_git,
            skip_makefile: flags.skip_makefile || self.skip_makefile,
            skip_update: flags.skip_update || self.skip_update,
        }
    }
}

pub fn load_create_options(path: &Path) -> Result<CreateOptions> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io("Failed to read config", path, e))?;
    serde_json::from_str(&raw).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_fill_repo_and_token() {
        let options = CreateOptions::default();
        assert_eq!(options.butano_repo(), DEFAULT_BUTANO_REPO);
        assert_eq!(options.template_token(), "template");
    }

    #[test]
    fn flags_override_file_values() {
        let file = CreateOptions {
            name: Some("from-file".to_string()),
            rom_code: Some("FILE".to_string()),
            skip_git: true,
            ..CreateOptions::default()
        };
        let flags = CreateOptions {
            name: Some("from-flag".to_string()),
            skip_deps: true,
            ..CreateOptions::default()
        };

        let merged = file.overlay(flags);
        assert_eq!(merged.name.as_deref(), Some("from-flag"));
        assert_eq!(merged.rom_code.as_deref(), Some("FILE"));
        assert!(merged.skip_git);
        assert!(merged.skip_deps);
        assert!(!merged.force);
    }

    #[test]
    fn load_create_options_reads_partial_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init-gba.json");
        fs::write(
            &path,
            r#"{ "butano_path": "/opt/butano", "skip_update": true }"#,
        )
        .unwrap();

        let options = load_create_options(&path).unwrap();
        assert_eq!(options.butano_path.as_deref(), Some("/opt/butano"));
        assert!(options.skip_update);
        assert!(options.name.is_none());
    }

    #[test]
    fn load_create_options_rejects_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init-gba.json");
        fs::write(&path, r#"{ "colour": "purple" }"#).unwrap();

        let err = load_create_options(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn load_create_options_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_create_options(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
