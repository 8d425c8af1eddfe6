use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs `cmd` to completion and captures its output. A non-zero exit is an
/// error carrying the trimmed stderr.
pub fn run(cmd: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandOutput> {
    let rendered = render_command(cmd, args);
    log::debug!(
        "running `{rendered}`{}",
        cwd.map(|dir| format!(" in {}", dir.display()))
            .unwrap_or_default()
    );

    let mut command = Command::new(cmd);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().map_err(|source| Error::Spawn {
        command: rendered.clone(),
        source,
    })?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: rendered,
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

/// True when an executable named `cmd` is reachable through `PATH`.
pub fn command_exists(cmd: &str) -> bool {
    find_executable(cmd, env::var_os("PATH")).is_some()
}

fn find_executable(cmd: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    env::split_paths(&path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidate_names(cmd).into_iter().map(move |name| dir.join(name)))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidate_names(cmd: &str) -> Vec<String> {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    let mut names = vec![cmd.to_string()];
    names.extend(
        exts.split(';')
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!("{cmd}{ext}")),
    );
    names
}

#[cfg(not(windows))]
fn candidate_names(cmd: &str) -> Vec<String> {
    vec![cmd.to_string()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn render_command(cmd: &str, args: &[&str]) -> String {
    std::iter::once(cmd)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn run_captures_stdout() {
        let output = run("echo", &["hello"], None).unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn run_honours_cwd() {
        let dir = TempDir::new().unwrap();
        let output = run("pwd", &[], Some(dir.path())).unwrap();
        let reported = fs::canonicalize(output.stdout.trim()).unwrap();
        assert_eq!(reported, fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn run_reports_missing_binary_as_spawn_error() {
        let err = run("nonexistent-command-xyz", &[], None).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn run_reports_non_zero_exit() {
        let err = run("sh", &["-c", "echo boom >&2; exit 3"], None).unwrap_err();
        match err {
            Error::CommandFailed {
                command, stderr, ..
            } => {
                assert_eq!(command, "sh -c echo boom >&2; exit 3");
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn command_exists_finds_shell() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistent-command-xyz-12345"));
    }

    #[test]
    fn find_executable_skips_non_executable_files() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("plain-tool");
        fs::write(&plain, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();
        let runnable = dir.path().join("runnable-tool");
        fs::write(&runnable, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&runnable, fs::Permissions::from_mode(0o755)).unwrap();

        let path_var = Some(dir.path().as_os_str().to_owned());
        assert!(find_executable("plain-tool", path_var.clone()).is_none());
        assert_eq!(find_executable("runnable-tool", path_var), Some(runnable));
    }

    #[test]
    fn find_executable_without_path_is_none() {
        assert!(find_executable("sh", None).is_none());
    }
}
