use std::fmt;
use std::path::Path;

use crate::config::Environment;
use crate::exec::command_exists;
use crate::prompt::Prompter;
use crate::report::Reporter;
use crate::Result;

pub const DEVKITPRO_GETTING_STARTED: &str = "https://devkitpro.org/wiki/Getting_Started";

/// Executables whose presence implies a devkitPro install.
const DEVKITPRO_TOOLS: &[&str] = &["arm-none-eabi-gcc", "dkp-pacman", "devkitpro-pacman"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyStatus {
    Detected,
    MissingInstall,
    MissingSkipped,
}

impl DependencyStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Detected => "detected",
            Self::MissingInstall => "install instructions shown",
            Self::MissingSkipped => "not detected",
        }
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn detect_devkitpro(env: &Environment) -> bool {
    detect_devkitpro_with(env, command_exists)
}

fn detect_devkitpro_with(env: &Environment, has_command: impl Fn(&str) -> bool) -> bool {
    if env
        .devkitpro
        .as_deref()
        .is_some_and(|dir| Path::new(dir).exists())
    {
        return true;
    }
    DEVKITPRO_TOOLS.iter().any(|tool| has_command(tool))
}

/// Checks for devkitPro and, when missing, points the user at the installer.
pub fn handle_dependencies(
    env: &Environment,
    prompter: &mut dyn Prompter,
    reporter: &mut dyn Reporter,
) -> Result<DependencyStatus> {
    resolve_dependencies(detect_devkitpro(env), prompter, reporter)
}

fn resolve_dependencies(
    detected: bool,
    prompter: &mut dyn Prompter,
    reporter: &mut dyn Reporter,
) -> Result<DependencyStatus> {
    if detected {
        return Ok(DependencyStatus::Detected);
    }

    if !prompter.confirm("devkitPro was not detected. Install it now?", false)? {
        return Ok(DependencyStatus::MissingSkipped);
    }

    reporter.message("Automatic devkitPro installation is not implemented yet.");
    reporter.message(&format!(
        "Please follow the official instructions: {DEVKITPRO_GETTING_STARTED}"
    ));
    Ok(DependencyStatus::MissingInstall)
}
