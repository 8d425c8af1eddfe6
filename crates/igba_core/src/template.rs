use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

const TEXT_EXTENSIONS: &[&str] = &[
    "bat", "c", "cmake", "cpp", "h", "hpp", "ini", "json", "mak", "markdown", "md", "mk", "sh",
    "toml", "txt", "yaml", "yml",
];
const TEXT_FILE_NAMES: &[&str] = &["CMakeLists.txt", "Makefile"];

/// Copies a template tree into `dest`, creating it as needed.
pub fn copy_template(src: &Path, dest: &Path) -> Result<()> {
    copy_dir(src, dest)
}

/// Copies `src` over an existing tree. Same-named files are replaced; other
/// files in `dest` are kept.
pub fn overlay_template(src: &Path, dest: &Path) -> Result<()> {
    copy_dir(src, dest)
}

/// Removes `.git` below `target`. Submodules and worktrees use a plain file.
pub fn remove_git_dir(target: &Path) -> Result<()> {
    let git_dir = target.join(".git");
    let Ok(meta) = fs::symlink_metadata(&git_dir) else {
        return Ok(());
    };
    let removed = if meta.is_dir() {
        fs::remove_dir_all(&git_dir)
    } else {
        fs::remove_file(&git_dir)
    };
    removed.map_err(|e| Error::io("Failed to remove", &git_dir, e))
}

/// Replaces `token` with `replacement` in every text file below `dir`,
/// along with its all-uppercase and all-lowercase spellings. Returns the number
/// of files that changed.
pub fn replace_token_in_text_files(dir: &Path, token: &str, replacement: &str) -> Result<usize> {
    let mut replacements: Vec<(String, String)> = vec![(token.to_string(), replacement.to_string())];
    let upper = token.to_uppercase();
    if upper != token {
        replacements.push((upper, replacement.to_uppercase()));
    }
    let lower = token.to_lowercase();
    if lower != token {
        replacements.push((lower, replacement.to_lowercase()));
    }

    let mut changed = 0;
    for path in list_files(dir)? {
        if !is_text_file(&path) {
            continue;
        }
        let data = fs::read(&path).map_err(|e| Error::io("Failed to read", &path, e))?;
        if data.contains(&0) {
            continue;
        }
        let Ok(content) = String::from_utf8(data) else {
            log::warn!("skipping non-UTF-8 file {}", path.display());
            continue;
        };

        let mut next = content.clone();
        for (needle, value) in &replacements {
            if needle.is_empty() {
                continue;
            }
            next = next.replace(needle.as_str(), value);
        }

        if next != content {
            fs::write(&path, next).map_err(|e| Error::io("Failed to write", &path, e))?;
            changed += 1;
        }
    }
    Ok(changed)
}

/// Renames files and directories whose name contains `token`. Children are
/// renamed before their parents so collected paths stay valid.
pub fn rename_paths_with_token(dir: &Path, token: &str, replacement: &str) -> Result<usize> {
    if token.is_empty() {
        return Ok(0);
    }

    let mut entries = list_all_paths(dir)?;
    entries.sort_by_key(|path| std::cmp::Reverse(path.as_os_str().len()));

    let mut renamed = 0;
    for entry in entries {
        let Some(base) = entry.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !base.contains(token) {
            continue;
        }
        let next = entry.with_file_name(base.replace(token, replacement));
        if next == entry {
            continue;
        }
        log::info!("renaming {} -> {}", entry.display(), next.display());
        fs::rename(&entry, &next).map_err(|e| Error::io("Failed to rename", &entry, e))?;
        renamed += 1;
    }
    Ok(renamed)
}

fn is_text_file(path: &Path) -> bool {
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext));
    by_extension
        || path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| TEXT_FILE_NAMES.contains(&name))
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).map_err(|e| Error::io("Failed to create directory", dest, e))?;
    let entries = fs::read_dir(src).map_err(|e| Error::io("Failed to read directory", src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("Failed to read directory", src, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io("Failed to inspect", entry.path(), e))?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());
        if file_type.is_dir() {
            copy_dir(&src_path, &dest_path)?;
        } else if file_type.is_file() {
            fs::copy(&src_path, &dest_path)
                .map_err(|e| Error::io("Failed to copy", &src_path, e))?;
        }
    }
    Ok(())
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(dir, &mut |path: &Path, is_dir: bool| {
        if !is_dir {
            files.push(path.to_path_buf());
        }
    })?;
    Ok(files)
}

fn list_all_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    walk(dir, &mut |path: &Path, _: bool| paths.push(path.to_path_buf()))?;
    Ok(paths)
}

/// Depth-first visit of regular files and directories below `dir`. Symlinks
/// are not followed.
fn walk(dir: &Path, visit: &mut dyn FnMut(&Path, bool)) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io("Failed to read directory", dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("Failed to read directory", dir, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io("Failed to inspect", &path, e))?;
        if file_type.is_dir() {
            walk(&path, visit)?;
            visit(&path, true);
        } else if file_type.is_file() {
            visit(&path, false);
        }
    }
    Ok(())
}
