use std::fmt;
use std::fs;
use std::path::Path;

use crate::git::{clone_repo, ensure_git_available, is_git_repo, local_head, remote_head, update_repo};
use crate::prompt::Prompter;
use crate::report::Reporter;
use crate::{Error, Result};

/// What happened to the Butano checkout while preparing a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButanoStatus {
    Downloaded,
    Existing,
    Unknown,
    UpToDate,
    Updated,
}

impl ButanoStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Downloaded => "downloaded",
            Self::Existing => "ready",
            Self::Unknown => "version unknown",
            Self::UpToDate => "up to date",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for ButanoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Makes sure a usable Butano checkout exists at `butano_dir`, downloading or
/// updating it with the user's consent.
pub fn ensure_butano(
    butano_dir: &Path,
    repo_url: &str,
    skip_update: bool,
    prompter: &mut dyn Prompter,
    reporter: &mut dyn Reporter,
) -> Result<ButanoStatus> {
    if !butano_dir.exists() {
        let download = prompter.confirm(
            &format!("Butano not found at {}. Download now?", butano_dir.display()),
            true,
        )?;
        if !download {
            return Err(Error::ButanoRequired);
        }
        download_butano(butano_dir, repo_url, reporter)?;
        return Ok(ButanoStatus::Downloaded);
    }

    if !is_git_repo(butano_dir) {
        let redownload =
            prompter.confirm("Butano folder is not a git repo. Re-download it?", false)?;
        if !redownload {
            return Ok(ButanoStatus::Existing);
        }
        ensure_git_available()?;
        fs::remove_dir_all(butano_dir).map_err(|e| Error::io("Failed to remove", butano_dir, e))?;
        download_butano(butano_dir, repo_url, reporter)?;
        return Ok(ButanoStatus::Downloaded);
    }

    if skip_update {
        return Ok(ButanoStatus::Existing);
    }

    if !prompter.confirm("Check Butano for updates?", true)? {
        return Ok(ButanoStatus::Existing);
    }

    ensure_git_available()?;
    let (Some(local), Some(remote)) = (local_head(butano_dir), remote_head(butano_dir)) else {
        log::warn!("could not read Butano HEAD in {}", butano_dir.display());
        reporter.message("Could not determine Butano version. Skipping update.");
        return Ok(ButanoStatus::Unknown);
    };

    if local == remote {
        return Ok(ButanoStatus::UpToDate);
    }
    log::info!("Butano at {local} differs from remote {remote}");

    if !prompter.confirm("Butano is out of date. Update now?", false)? {
        return Ok(ButanoStatus::Existing);
    }

    reporter.message("Updating Butano...");
    update_repo(butano_dir)?;
    Ok(ButanoStatus::Updated)
}

fn download_butano(butano_dir: &Path, repo_url: &str, reporter: &mut dyn Reporter) -> Result<()> {
    ensure_git_available()?;
    if let Some(parent) = butano_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io("Failed to create directory", parent, e))?;
    }
    reporter.message("Downloading Butano...");
    clone_repo(repo_url, butano_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedPrompter;
    use crate::report::testing::RecordingReporter;
    use tempfile::TempDir;

    #[cfg(unix)]
    use crate::git::testing::{git, Origin};

    #[test]
    fn labels_match_progress_wording() {
        assert_eq!(ButanoStatus::Downloaded.label(), "downloaded");
        assert_eq!(ButanoStatus::Existing.label(), "ready");
        assert_eq!(ButanoStatus::Unknown.label(), "version unknown");
        assert_eq!(ButanoStatus::UpToDate.label(), "up to date");
        assert_eq!(ButanoStatus::Updated.to_string(), "updated");
    }

    #[test]
    fn declining_download_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::confirming(&[false]);
        let mut reporter = RecordingReporter::default();

        let err = ensure_butano(
            &tmp.path().join("butano"),
            "https://example.invalid/butano.git",
            false,
            &mut prompter,
            &mut reporter,
        )
        .unwrap_err();

        assert!(matches!(err, Error::ButanoRequired));
        assert!(prompter.asked[0].starts_with("Butano not found at "));
        assert!(reporter.messages.is_empty());
    }

    #[test]
    fn plain_folder_is_kept_when_redownload_declined() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("butano.mak"), "").unwrap();
        let mut prompter = ScriptedPrompter::default();
        let mut reporter = RecordingReporter::default();

        let status = ensure_butano(tmp.path(), "unused", false, &mut prompter, &mut reporter)
            .unwrap();

        assert_eq!(status, ButanoStatus::Existing);
        assert_eq!(
            prompter.asked,
            vec!["Butano folder is not a git repo. Re-download it?"]
        );
        assert!(tmp.path().join("butano.mak").exists());
    }

    #[test]
    fn skip_update_short_circuits_git_checkout() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let mut prompter = ScriptedPrompter::default();
        let mut reporter = RecordingReporter::default();

        let status =
            ensure_butano(tmp.path(), "unused", true, &mut prompter, &mut reporter).unwrap();

        assert_eq!(status, ButanoStatus::Existing);
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn declining_update_check_keeps_checkout() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let mut prompter = ScriptedPrompter::confirming(&[false]);
        let mut reporter = RecordingReporter::default();

        let status =
            ensure_butano(tmp.path(), "unused", false, &mut prompter, &mut reporter).unwrap();

        assert_eq!(status, ButanoStatus::Existing);
        assert_eq!(prompter.asked, vec!["Check Butano for updates?"]);
    }

    #[cfg(unix)]
    #[test]
    fn accepted_redownload_replaces_plain_folder() {
        let tmp = TempDir::new().unwrap();
        let origin = Origin::new(tmp.path(), "main");
        let butano = tmp.path().join("butano");
        fs::create_dir_all(&butano).unwrap();
        fs::write(butano.join("stale.txt"), "").unwrap();
        let mut prompter = ScriptedPrompter::confirming(&[true]);
        let mut reporter = RecordingReporter::default();

        let status =
            ensure_butano(&butano, &origin.url, false, &mut prompter, &mut reporter).unwrap();

        assert_eq!(status, ButanoStatus::Downloaded);
        assert!(is_git_repo(&butano));
        assert!(!butano.join("stale.txt").exists());
        assert_eq!(reporter.messages, vec!["Downloading Butano..."]);
    }

    #[cfg(unix)]
    #[test]
    fn matching_heads_are_up_to_date() {
        let tmp = TempDir::new().unwrap();
        let origin = Origin::new(tmp.path(), "main");
        let butano = tmp.path().join("butano");
        clone_repo(&origin.url, &butano).unwrap();
        let mut prompter = ScriptedPrompter::confirming(&[true]);
        let mut reporter = RecordingReporter::default();

        let status =
            ensure_butano(&butano, &origin.url, false, &mut prompter, &mut reporter).unwrap();

        assert_eq!(status, ButanoStatus::UpToDate);
        assert_eq!(prompter.asked, vec!["Check Butano for updates?"]);
    }

    #[cfg(unix)]
    #[test]
    fn outdated_checkout_is_updated_on_consent() {
        let tmp = TempDir::new().unwrap();
        let origin = Origin::new(tmp.path(), "main");
        let butano = tmp.path().join("butano");
        clone_repo(&origin.url, &butano).unwrap();
        let head = origin.commit("second");
        let mut prompter = ScriptedPrompter::confirming(&[true, true]);
        let mut reporter = RecordingReporter::default();

        let status =
            ensure_butano(&butano, &origin.url, false, &mut prompter, &mut reporter).unwrap();

        assert_eq!(status, ButanoStatus::Updated);
        assert_eq!(local_head(&butano), Some(head));
        assert_eq!(
            prompter.asked,
            vec!["Check Butano for updates?", "Butano is out of date. Update now?"]
        );
        assert_eq!(reporter.messages, vec!["Updating Butano..."]);
    }

    #[cfg(unix)]
    #[test]
    fn checkout_without_origin_is_unknown() {
        let tmp = TempDir::new().unwrap();
        git(tmp.path(), &["init", "--quiet"]);
        let mut prompter = ScriptedPrompter::confirming(&[true]);
        let mut reporter = RecordingReporter::default();

        let status =
            ensure_butano(tmp.path(), "unused", false, &mut prompter, &mut reporter).unwrap();

        assert_eq!(status, ButanoStatus::Unknown);
        assert_eq!(
            reporter.messages,
            vec!["Could not determine Butano version. Skipping update."]
        );
    }
}
