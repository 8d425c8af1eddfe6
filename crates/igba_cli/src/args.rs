use std::path::PathBuf;

use igba_core::config::CreateOptions;
use igba_core::doctor::ExamplePreset;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Create(CreateArgs),
    Doctor(DoctorArgs),
    Help,
    Version,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateArgs {
    pub options: CreateOptions,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorArgs {
    pub build_example: Option<ExamplePreset>,
    pub butano_path: Option<String>,
    pub devkitpro: bool,
    pub example_path: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub verbose: bool,
}

pub fn usage() -> String {
    "\
Usage: init-gba [create] [options]
       init-gba doctor [options]

Create a new GBA project using Butano, or check your environment for common
Butano issues.

Create options:
  -n, --name <name>            Game name
      --dir <path>             Target directory for the project
      --butano-path <path>     Butano installation path
      --butano-repo <url>      Butano git repository URL
      --template-path <path>   Path to the template folder
      --template-token <text>  Template token to replace in files
      --rom-title <text>       ROM title (uppercase, max 12 chars)
      --rom-code <text>        ROM code (4 uppercase characters)
      --config <file>          JSON file with default values for these options
      --force                  Overwrite target directory if it exists
      --non-interactive        Fail if required input is missing
  -y, --yes                    Accept defaults and skip prompts
      --skip-deps              Skip devkitPro dependency checks
      --skip-git               Skip git init
      --skip-makefile          Skip Makefile generation
      --skip-update            Skip checking for Butano updates

Doctor options:
      --build-example <preset> Build a preset example (core, custom, maxmod, select, text)
      --example-path <path>    Example project path to build (custom preset)
      --butano-path <path>     Butano installation path
      --devkitpro              Print devkitPro setup guidance

Global options:
  -v, --verbose                Log debug output to stderr (RUST_LOG overrides)
  -h, --help                   Print this help
  -V, --version                Print version"
        .to_string()
}

/// Parses everything after the program name.
pub fn parse<I>(args: I) -> Result<Cli, String>
where
    I: IntoIterator<Item = String>,
{
    let mut tokens = args.into_iter().peekable();
    let subcommand = match tokens.peek().map(String::as_str) {
        Some("create") | Some("doctor") | Some("help") => tokens.next(),
        _ => None,
    };

    let mut verbose = false;
    let mut help = false;
    let mut version = false;
    let mut create = CreateArgs::default();
    let mut doctor = DoctorArgs::default();
    let is_doctor = subcommand.as_deref() == Some("doctor");

    while let Some(token) = tokens.next() {
        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (token.clone(), None),
        };
        let mut value = || -> Result<String, String> {
            match inline.clone() {
                Some(value) => Ok(value),
                None => tokens
                    .next()
                    .ok_or_else(|| format!("Missing value for {flag}\n\n{}", usage())),
            }
        };

        match flag.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => help = true,
            "-V" | "--version" => version = true,

            "--butano-path" if is_doctor => doctor.butano_path = Some(value()?),
            "--build-example" if is_doctor => {
                let preset = value()?;
                doctor.build_example = Some(
                    preset
                        .parse()
                        .map_err(|e: String| format!("{e}\n\n{}", usage()))?,
                );
            }
            "--example-path" if is_doctor => doctor.example_path = Some(value()?),
            "--devkitpro" if is_doctor => doctor.devkitpro = true,

            "-n" | "--name" if !is_doctor => create.options.name = Some(value()?),
            "--dir" if !is_doctor => create.options.dir = Some(value()?),
            "--butano-path" => create.options.butano_path = Some(value()?),
            "--butano-repo" if !is_doctor => create.options.butano_repo = Some(value()?),
            "--template-path" if !is_doctor => create.options.template_path = Some(value()?),
            "--template-token" if !is_doctor => create.options.template_token = Some(value()?),
            "--rom-title" if !is_doctor => create.options.rom_title = Some(value()?),
            "--rom-code" if !is_doctor => create.options.rom_code = Some(value()?),
            "--config" if !is_doctor => create.config = Some(PathBuf::from(value()?)),
            "--force" if !is_doctor => create.options.force = true,
            "--non-interactive" if !is_doctor => create.options.non_interactive = true,
            "-y" | "--yes" if !is_doctor => create.options.yes = true,
            "--skip-deps" if !is_doctor => create.options.skip_deps = true,
            "--skip-git" if !is_doctor => create.options.skip_git = true,
            "--skip-makefile" if !is_doctor => create.options.skip_makefile = true,
            "--skip-update" if !is_doctor => create.options.skip_update = true,

            other => return Err(format!("Unexpected argument '{other}'\n\n{}", usage())),
        }
    }

    let command = if help || subcommand.as_deref() == Some("help") {
        Command::Help
    } else if version {
        Command::Version
    } else if is_doctor {
        Command::Doctor(doctor)
    } else {
        Command::Create(create)
    };
    Ok(Cli { command, verbose })
}
