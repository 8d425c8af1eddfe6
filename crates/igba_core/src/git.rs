use std::path::Path;

use crate::exec::{command_exists, run};
use crate::prompt::Prompter;
use crate::{Error, Result};

const REMOTE_REF_PREFIX: &str = "refs/remotes/origin/";

pub fn is_git_repo(dir: &Path) -> bool {
    dir.join(".git").exists()
}

pub fn local_head(dir: &Path) -> Option<String> {
    let output = run("git", &["rev-parse", "HEAD"], Some(dir)).ok()?;
    non_empty(output.stdout.trim())
}

pub fn remote_head(dir: &Path) -> Option<String> {
    let output = run("git", &["ls-remote", "origin", "HEAD"], Some(dir)).ok()?;
    parse_ls_remote(&output.stdout)
}

pub fn default_remote_branch(dir: &Path) -> Option<String> {
    let output = run(
        "git",
        &["symbolic-ref", "refs/remotes/origin/HEAD"],
        Some(dir),
    )
    .ok()?;
    parse_symbolic_ref(&output.stdout)
}

/// Fast-forwards a shallow checkout to the remote default branch.
pub fn update_repo(dir: &Path) -> Result<()> {
    run("git", &["fetch", "--depth", "1", "origin"], Some(dir))?;
    let branch = default_remote_branch(dir).unwrap_or_else(|| "main".to_string());
    let target = format!("origin/{branch}");
    if let Err(err) = run("git", &["reset", "--hard", &target], Some(dir)) {
        log::warn!("reset to {target} failed ({err}); trying origin/master");
        run("git", &["reset", "--hard", "origin/master"], Some(dir))?;
    }
    Ok(())
}

pub fn clone_repo(url: &str, dir: &Path) -> Result<()> {
    let dir_arg = dir.to_string_lossy();
    log::info!("cloning {url} into {}", dir.display());
    run("git", &["clone", "--depth", "1", url, &dir_arg], None)?;
    Ok(())
}

pub fn ensure_git_available() -> Result<()> {
    if command_exists("git") {
        Ok(())
    } else {
        Err(Error::GitMissing)
    }
}

/// Asks before creating a repository. Returns whether one was created.
pub fn maybe_init_git(target_dir: &Path, prompter: &mut dyn Prompter) -> Result<bool> {
    if !prompter.confirm("Initialize a git repository?", false)? {
        return Ok(false);
    }
    ensure_git_available()?;
    run("git", &["init"], Some(target_dir))?;
    Ok(true)
}

fn parse_ls_remote(stdout: &str) -> Option<String> {
    stdout
        .split_whitespace()
        .next()
        .and_then(non_empty)
}

fn parse_symbolic_ref(stdout: &str) -> Option<String> {
    let reference = stdout.trim();
    let branch = reference.strip_prefix(REMOTE_REF_PREFIX)?;
    non_empty(branch)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
