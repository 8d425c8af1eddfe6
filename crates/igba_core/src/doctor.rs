//! Environment checks for Butano development.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Environment;
use crate::exec::{command_exists, run};
use crate::paths::{expand_home, resolve_butano_lib_dir};
use crate::prompt::Prompter;
use crate::{Error, Result};

pub const DEVKITPRO_GUIDANCE: &str = "\
devkitPro setup

Install devkitPro pacman and set up your shell:
https://devkitpro.org/wiki/devkitPro_pacman

Required environment variables:
DEVKITPRO=/path/to/devkitpro
DEVKITARM=$DEVKITPRO/devkitARM

Install the GBA toolchain:
dkp-pacman -S gba-dev";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub label: String,
    pub message: String,
    pub status: CheckStatus,
}

impl CheckResult {
    fn new(label: &str, message: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            label: label.to_string(),
            message: message.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub ok: usize,
    pub warn: usize,
    pub error: usize,
}

pub fn summarize(results: &[CheckResult]) -> Summary {
    results.iter().fold(Summary::default(), |mut summary, result| {
        match result.status {
            CheckStatus::Ok => summary.ok += 1,
            CheckStatus::Warn => summary.warn += 1,
            CheckStatus::Error => summary.error += 1,
        }
        summary
    })
}

/// Runs every check against the real `PATH`.
pub fn run_checks(env: &Environment, butano_base: &Path) -> Vec<CheckResult> {
    run_checks_with(env, butano_base, command_exists)
}

fn run_checks_with(
    env: &Environment,
    butano_base: &Path,
    has_command: impl Fn(&str) -> bool,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let devkitpro = env.devkitpro.as_deref();
    match devkitpro {
        Some(dir) if Path::new(dir).exists() => {
            results.push(CheckResult::new("DEVKITPRO", dir, CheckStatus::Ok));
        }
        Some(_) => results.push(CheckResult::new(
            "DEVKITPRO",
            "Path does not exist",
            CheckStatus::Warn,
        )),
        None => results.push(CheckResult::new("DEVKITPRO", "Not set", CheckStatus::Warn)),
    }

    let devkitarm_candidates = [
        env.devkitarm.as_deref().map(PathBuf::from),
        devkitpro.map(|dir| Path::new(dir).join("devkitARM")),
    ];
    match devkitarm_candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.exists())
    {
        Some(path) => results.push(CheckResult::new(
            "DEVKITARM",
            path.to_string_lossy(),
            CheckStatus::Ok,
        )),
        None => results.push(CheckResult::new(
            "DEVKITARM",
            "Not set or missing",
            CheckStatus::Warn,
        )),
    }

    for (tool, missing) in [
        ("make", CheckStatus::Error),
        ("arm-none-eabi-gcc", CheckStatus::Error),
        ("dkp-pacman", CheckStatus::Warn),
    ] {
        let found = has_command(tool);
        results.push(CheckResult::new(
            tool,
            if found { "found" } else { "missing" },
            if found { CheckStatus::Ok } else { missing },
        ));
    }

    let lib_dir = resolve_butano_lib_dir(butano_base);
    results.push(butano_check(
        butano_base.exists(),
        lib_dir.join("butano.mak").exists(),
        &lib_dir,
    ));

    results
}

pub fn butano_check(exists: bool, mak_exists: bool, lib_dir: &Path) -> CheckResult {
    match (exists, mak_exists) {
        (true, true) => CheckResult::new("Butano", lib_dir.to_string_lossy(), CheckStatus::Ok),
        (true, false) => CheckResult::new("Butano", "butano.mak missing", CheckStatus::Warn),
        (false, _) => CheckResult::new("Butano", "Not found", CheckStatus::Error),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamplePreset {
    Core,
    Custom,
    Maxmod,
    Select,
    Text,
}

impl ExamplePreset {
    pub const NAMES: &'static [&'static str] = &["core", "custom", "maxmod", "select", "text"];
}

impl FromStr for ExamplePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "core" => Ok(Self::Core),
            "custom" => Ok(Self::Custom),
            "maxmod" => Ok(Self::Maxmod),
            "select" => Ok(Self::Select),
            "text" => Ok(Self::Text),
            other => Err(format!(
                "Unknown example preset '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// An example project to build. `path` is `None` when it could not be located;
/// the label then says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSelection {
    pub label: String,
    pub path: Option<PathBuf>,
}

const SELECT_OPTIONS: [(&str, ExamplePreset); 4] = [
    ("Maxmod (devkitPro example)", ExamplePreset::Maxmod),
    ("Butano text example", ExamplePreset::Text),
    ("Butano core example", ExamplePreset::Core),
    ("Custom path", ExamplePreset::Custom),
];

/// Maps a preset to an example directory. Returns `None` when the user backs
/// out or no custom path can be obtained.
pub fn resolve_example_selection(
    preset: ExamplePreset,
    butano_base: &Path,
    example_path: Option<&str>,
    env: &Environment,
    prompter: &mut dyn Prompter,
) -> Result<Option<ExampleSelection>> {
    let butano_example = |label: &str, name: &str| ExampleSelection {
        label: label.to_string(),
        path: Some(butano_base.join("examples").join(name)),
    };

    match preset {
        ExamplePreset::Select => {
            if !prompter.is_interactive() {
                return Ok(Some(butano_example("Butano text example", "text")));
            }
            let labels: Vec<&str> = SELECT_OPTIONS.iter().map(|(label, _)| *label).collect();
            let choice = match prompter.select("Select an example to build", &labels) {
                Ok(index) => index,
                Err(Error::Cancelled) => return Ok(None),
                Err(err) => return Err(err),
            };
            let Some((_, chosen)) = SELECT_OPTIONS.get(choice) else {
                return Ok(None);
            };
            resolve_example_selection(*chosen, butano_base, example_path, env, prompter)
        }
        ExamplePreset::Custom => {
            let path = match example_path.map(str::trim).filter(|p| !p.is_empty()) {
                Some(path) => path.to_string(),
                None if prompter.is_interactive() => {
                    match prompter.text("Custom example path", None) {
                        Ok(path) => path,
                        Err(Error::Cancelled) => return Ok(None),
                        Err(err) => return Err(err),
                    }
                }
                None => return Ok(None),
            };
            Ok(Some(ExampleSelection {
                label: "Custom example".to_string(),
                path: Some(expand_home(&path, env.home.as_deref())),
            }))
        }
        ExamplePreset::Core => Ok(Some(butano_example("Butano core example", "core"))),
        ExamplePreset::Text => Ok(Some(butano_example("Butano text example", "text"))),
        ExamplePreset::Maxmod => {
            let Some(devkitpro) = env.devkitpro.as_deref() else {
                return Ok(Some(ExampleSelection {
                    label: "Maxmod example (DEVKITPRO not set)".to_string(),
                    path: None,
                }));
            };
            Ok(Some(match resolve_maxmod_example_path(Path::new(devkitpro)) {
                Some(path) => ExampleSelection {
                    label: "Maxmod example".to_string(),
                    path: Some(path),
                },
                None => ExampleSelection {
                    label: "Maxmod example (not found)".to_string(),
                    path: None,
                },
            }))
        }
    }
}

pub fn resolve_maxmod_example_path(devkitpro_dir: &Path) -> Option<PathBuf> {
    let gba = devkitpro_dir.join("examples").join("gba");
    [gba.join("maxmod"), gba.join("audio").join("maxmod")]
        .into_iter()
        .find(|candidate| candidate.exists())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    NotFound,
    Succeeded,
    Failed,
}

/// Cleans and rebuilds the example with `make`. Build failures are an outcome,
/// not an error: the point is to report whether the toolchain works.
pub fn build_example(selection: &ExampleSelection) -> BuildOutcome {
    let Some(path) = selection.path.as_deref().filter(|path| path.exists()) else {
        return BuildOutcome::NotFound;
    };
    let dir = path.to_string_lossy();
    let built = run("make", &["-C", &dir, "clean"], None).and_then(|_| run("make", &["-C", &dir], None));
    match built {
        Ok(_) => BuildOutcome::Succeeded,
        Err(err) => {
            log::warn!("example build in {} failed: {err}", path.display());
            BuildOutcome::Failed
        }
    }
}
