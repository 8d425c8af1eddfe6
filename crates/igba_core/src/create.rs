use std::fs;
use std::path::{Path, PathBuf};

use crate::butano::{ensure_butano, ButanoStatus};
use crate::config::{CreateOptions, Environment};
use crate::deps::{handle_dependencies, DependencyStatus};
use crate::git::maybe_init_git;
use crate::makefile::write_makefile;
use crate::paths::{
    default_butano_dir, ensure_empty_target, expand_home, has_unsafe_path_characters,
    normalize_lexically, normalize_relative_path, relative_path, resolve_butano_common_dir,
    resolve_butano_lib_dir,
};
use crate::prompt::{resolve_text, Prompter};
use crate::report::{Reporter, Status};
use crate::rom::{resolve_rom_metadata, to_rom_code, to_rom_title, RomOverrides};
use crate::starter::write_starter;
use crate::template::{
    copy_template, remove_git_dir, rename_paths_with_token, replace_token_in_text_files,
};
use crate::{Error, Result};

const FALLBACK_PROJECT_NAME: &str = "my-gba-game";
const MAX_PROJECT_ID_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct CreateSummary {
    pub project_name: String,
    pub project_id: String,
    pub target_dir: PathBuf,
    pub butano_dir: PathBuf,
    pub butano_status: ButanoStatus,
    /// `None` when the dependency check was skipped.
    pub dependency_status: Option<DependencyStatus>,
    pub renamed_paths: usize,
    pub changed_files: usize,
    pub makefile: Option<PathBuf>,
    /// `None` when git setup was skipped.
    pub git_initialized: Option<bool>,
}

/// Identifier used for ROM defaults: lowercase ASCII words joined by `_`.
pub fn to_project_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !id.is_empty() {
                id.push('_');
            }
            pending_separator = false;
            id.push(c);
        } else {
            pending_separator = true;
        }
    }
    if id.is_empty() {
        return "project".to_string();
    }
    id.chars().take(MAX_PROJECT_ID_LEN).collect()
}

/// Scaffolds a new Butano project. `cwd` anchors relative paths and supplies
/// the default project name.
pub fn create_project(
    options: &CreateOptions,
    env: &Environment,
    cwd: &Path,
    prompter: &mut dyn Prompter,
    reporter: &mut dyn Reporter,
) -> Result<CreateSummary> {
    let home = env.home.as_deref();
    let default_name = cwd
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_PROJECT_NAME)
        .to_string();
    let project_name = resolve_text(
        options.name.as_deref(),
        prompter,
        "Name",
        Some(default_name.as_str()),
    )?;
    let project_id = to_project_id(&project_name);

    let default_dir = cwd.join(&project_name).to_string_lossy().into_owned();
    let target_input = resolve_text(
        options.dir.as_deref(),
        prompter,
        "Project directory",
        Some(default_dir.as_str()),
    )?;
    let target_dir = absolutize(cwd, expand_home(&target_input, home));

    if has_unsafe_path_characters(&target_dir.to_string_lossy()) {
        reporter.note(
            "Path warning",
            "Project path contains spaces or special characters.\nButano recommends avoiding them.",
        );
    }

    ensure_empty_target(&target_dir, options.force, prompter)?;
    reporter.progress("Project", &project_name, Status::Success);

    let default_butano = default_butano_dir(env).to_string_lossy().into_owned();
    let default_butano = expand_home(&default_butano, home).to_string_lossy().into_owned();
    let butano_input = resolve_text(
        options.butano_path.as_deref(),
        prompter,
        "Butano path",
        Some(default_butano.as_str()),
    )?;
    let butano_dir = absolutize(cwd, expand_home(&butano_input, home));

    let butano_status = ensure_butano(
        &butano_dir,
        options.butano_repo(),
        options.skip_update,
        prompter,
        reporter,
    )?;
    let butano_outcome = if butano_status == ButanoStatus::Unknown {
        Status::Warning
    } else {
        Status::Success
    };
    reporter.progress("Butano", butano_status.label(), butano_outcome);

    let dependency_status = if options.skip_deps {
        None
    } else {
        let status = handle_dependencies(env, prompter, reporter)?;
        let outcome = if status == DependencyStatus::Detected {
            Status::Success
        } else {
            Status::Skip
        };
        reporter.progress("devkitPro", status.label(), outcome);
        Some(status)
    };

    let template_path = match options.template_path.as_deref() {
        Some(path) => absolutize(cwd, expand_home(path, home)),
        None => butano_dir.join("template"),
    };
    if !template_path.exists() {
        return Err(Error::TemplateMissing(template_path));
    }

    fs::create_dir_all(&target_dir)
        .map_err(|e| Error::io("Failed to create directory", &target_dir, e))?;
    copy_template(&template_path, &target_dir)?;
    write_starter(&target_dir)?;
    remove_git_dir(&target_dir)?;
    reporter.progress("Template", "copied", Status::Success);

    let token = options.template_token();
    let renamed_paths = rename_paths_with_token(&target_dir, token, &project_name)?;
    let changed_files = replace_token_in_text_files(&target_dir, token, &project_name)?;
    log::info!("renamed {renamed_paths} paths, rewrote {changed_files} files");

    let makefile = if options.skip_makefile {
        None
    } else {
        let lib_dir = resolve_butano_lib_dir(&butano_dir);
        let common_dir = resolve_butano_common_dir(&lib_dir).map(|common| {
            normalize_relative_path(&relative_path(&target_dir, &common).to_string_lossy())
        });
        let rom = resolve_rom_metadata(
            &to_rom_title(&project_id),
            &to_rom_code(&project_id),
            RomOverrides {
                title: options.rom_title.as_deref(),
                code: options.rom_code.as_deref(),
            },
            !prompter.is_interactive(),
            prompter,
        )?;
        let path = write_makefile(
            &target_dir,
            &lib_dir.to_string_lossy(),
            &project_id,
            common_dir.as_deref(),
            rom.as_ref(),
        )?;
        reporter.progress("Makefile", "written", Status::Success);
        Some(path)
    };

    let git_initialized = if options.skip_git {
        None
    } else {
        let initialized = maybe_init_git(&target_dir, prompter)?;
        if initialized {
            reporter.progress("Git", "initialized", Status::Success);
        } else {
            reporter.progress("Git", "skipped", Status::Skip);
        }
        Some(initialized)
    };

    Ok(CreateSummary {
        project_name,
        project_id,
        target_dir,
        butano_dir,
        butano_status,
        dependency_status,
        renamed_paths,
        changed_files,
        makefile,
        git_initialized,
    })
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    let path = if path.is_absolute() { path } else { cwd.join(path) };
    normalize_lexically(&path)
}
