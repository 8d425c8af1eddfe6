use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::Environment;
use crate::prompt::Prompter;
use crate::{Error, Result};

/// Expands a leading `~/` against `home`. Anything else is returned as-is.
pub fn expand_home(input: &str, home: Option<&Path>) -> PathBuf {
    match (input.strip_prefix("~/"), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

pub fn default_butano_dir(env: &Environment) -> PathBuf {
    if let Some(path) = env.butano_path.as_deref().filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    env.home
        .clone()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join("Documents")
        .join("butano")
}

/// Butano's makefiles break on paths with spaces and shell metacharacters.
pub fn has_unsafe_path_characters(path: &str) -> bool {
    path.chars().any(|c| {
        !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '\\' | ':' | '~'))
    })
}

/// Renders a relative path with `/` separators, mapping the current directory
/// to the empty string.
pub fn normalize_relative_path(input: &str) -> String {
    if input.is_empty() || input == "." {
        return String::new();
    }
    input
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves `.` and `..` components without touching the filesystem. A `..`
/// at the root is dropped.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Lexical relative path from `from` to `to`. Both should be absolute.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let shared = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..from.len() {
        relative.push("..");
    }
    for component in &to[shared..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Locates the directory holding `butano.mak`: either `butano_dir` itself or
/// the nested `butano/` folder of a full repository checkout.
pub fn resolve_butano_lib_dir(butano_dir: &Path) -> PathBuf {
    if butano_dir.join("butano.mak").exists() {
        return butano_dir.to_path_buf();
    }
    let nested = butano_dir.join("butano");
    if nested.join("butano.mak").exists() {
        return nested;
    }
    butano_dir.to_path_buf()
}

/// Finds Butano's shared `common/` assets next to, or inside, the lib dir.
pub fn resolve_butano_common_dir(lib_dir: &Path) -> Option<PathBuf> {
    let sibling = lib_dir.parent().map(|parent| parent.join("common"));
    if let Some(sibling) = sibling.filter(|dir| dir.is_dir()) {
        return Some(sibling);
    }
    let nested = lib_dir.join("common");
    nested.is_dir().then_some(nested)
}

pub fn ensure_empty_target(target: &Path, force: bool, prompter: &mut dyn Prompter) -> Result<()> {
    let meta = match fs::metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io("Failed to inspect", target, e)),
    };
    if !meta.is_dir() {
        return Err(Error::TargetNotDirectory(target.to_path_buf()));
    }

    let mut entries =
        fs::read_dir(target).map_err(|e| Error::io("Failed to read directory", target, e))?;
    if entries.next().is_none() {
        return Ok(());
    }

    let overwrite = force
        || prompter.confirm(
            &format!(
                "Directory {} is not empty. Overwrite it?",
                target.display()
            ),
            false,
        )?;
    if !overwrite {
        return Err(Error::TargetNotEmpty(target.to_path_buf()));
    }

    log::info!("removing existing contents of {}", target.display());
    fs::remove_dir_all(target).map_err(|e| Error::io("Failed to clear", target, e))
}
