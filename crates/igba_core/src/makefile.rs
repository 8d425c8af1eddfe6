use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::rom::{to_rom_code, to_rom_title, RomMetadata};
use crate::{Error, Result};

const HEADER: &str = "\
#---------------------------------------------------------------------------------------------------------------------
# TARGET is the name of the output.
# BUILD is the directory where object files & intermediate files will be placed.
# LIBBUTANO is the main directory of butano library (https://github.com/GValiente/butano).
# PYTHON is the path to the python interpreter.
# SOURCES is a list of directories containing source code.
# INCLUDES is a list of directories containing extra header files.
# DATA is a list of directories containing binary data files with *.bin extension.
# GRAPHICS is a list of files and directories containing files to be processed by grit.
# AUDIO is a list of files and directories containing files to be processed by the audio backend.
# AUDIOBACKEND specifies the backend used for audio playback. Supported backends: maxmod, aas, null.
# AUDIOTOOL is the path to the tool used process the audio files.
# DMGAUDIO is a list of files and directories containing files to be processed by the DMG audio backend.
# DMGAUDIOBACKEND specifies the backend used for DMG audio playback. Supported backends: default, null.
# ROMTITLE is a uppercase ASCII, max 12 characters text string containing the output ROM title.
# ROMCODE is a uppercase ASCII, max 4 characters text string containing the output ROM code.
# USERFLAGS is a list of additional compiler flags:
#     Pass -flto to enable link-time optimization.
#     Pass -O0 or -Og to try to make debugging work.
# USERCXXFLAGS is a list of additional compiler flags for C++ code only.
# USERASFLAGS is a list of additional assembler flags.
# USERLDFLAGS is a list of additional linker flags:
#     Pass -flto=<number_of_cpu_cores> to enable parallel link-time optimization.
# USERLIBDIRS is a list of additional directories containing libraries.
#     Each libraries directory must contains include and lib subdirectories.
# USERLIBS is a list of additional libraries to link with the project.
# DEFAULTLIBS links standard system libraries when it is not empty.
# STACKTRACE enables stack trace logging when it is not empty.
# USERBUILD is a list of additional directories to remove when cleaning the project.
# EXTTOOL is an optional command executed before processing audio, graphics and code files.
#
# All directories are specified relative to the project directory where the makefile is found.
#---------------------------------------------------------------------------------------------------------------------
";

const NAME_WIDTH: usize = 14;

const FOOTER: &str = "
#---------------------------------------------------------------------------------------------------------------------
# Export absolute butano path:
#---------------------------------------------------------------------------------------------------------------------
ifndef LIBBUTANOABS
\texport LIBBUTANOABS\t:=\t$(realpath $(LIBBUTANO))
endif

#---------------------------------------------------------------------------------------------------------------------
# Include main makefile:
#---------------------------------------------------------------------------------------------------------------------
include $(LIBBUTANOABS)/butano.mak
";

/// Renders the project Makefile. `common_dir` is the project-relative path of
/// Butano's shared assets; when present its subfolders join the search lists.
pub fn makefile_contents(
    butano_dir: &str,
    project_id: &str,
    common_dir: Option<&str>,
    rom: Option<&RomMetadata>,
) -> String {
    let common = common_dir.filter(|dir| !dir.is_empty()).map(escape_make_path);
    let with_common = |local: &str| match &common {
        Some(dir) => format!("{local} {dir}/{local}"),
        None => local.to_string(),
    };
    let rom_title = rom
        .map(|meta| meta.title.clone())
        .unwrap_or_else(|| to_rom_title(project_id));
    let rom_code = rom
        .map(|meta| meta.code.clone())
        .unwrap_or_else(|| to_rom_code(project_id));

    let variables: [(&str, String); 25] = [
        ("TARGET", "$(notdir $(CURDIR))".to_string()),
        ("BUILD", "build".to_string()),
        ("LIBBUTANO", escape_make_path(butano_dir)),
        ("PYTHON", "python3".to_string()),
        ("SOURCES", "src".to_string()),
        ("INCLUDES", with_common("include")),
        ("DATA", String::new()),
        ("GRAPHICS", with_common("graphics")),
        ("AUDIO", with_common("audio")),
        ("AUDIOBACKEND", "maxmod".to_string()),
        ("AUDIOTOOL", String::new()),
        ("DMGAUDIO", with_common("dmg_audio")),
        ("DMGAUDIOBACKEND", "default".to_string()),
        ("ROMTITLE", rom_title),
        ("ROMCODE", rom_code),
        ("USERFLAGS", String::new()),
        ("USERCXXFLAGS", String::new()),
        ("USERASFLAGS", String::new()),
        ("USERLDFLAGS", String::new()),
        ("USERLIBDIRS", String::new()),
        ("USERLIBS", String::new()),
        ("DEFAULTLIBS", String::new()),
        ("STACKTRACE", String::new()),
        ("USERBUILD", String::new()),
        ("EXTTOOL", String::new()),
    ];

    let mut out = String::from(HEADER);
    for (name, value) in &variables {
        let assignment = if name.len() < NAME_WIDTH {
            format!("{name:<width$}:=", width = NAME_WIDTH)
        } else {
            format!("{name} :=")
        };
        if value.is_empty() {
            let _ = writeln!(out, "{assignment}");
        } else {
            let _ = writeln!(out, "{assignment}  {value}");
        }
    }
    out.push_str(FOOTER);
    out
}

pub fn write_makefile(
    target_dir: &Path,
    butano_dir: &str,
    project_id: &str,
    common_dir: Option<&str>,
    rom: Option<&RomMetadata>,
) -> Result<PathBuf> {
    let path = target_dir.join("Makefile");
    let contents = makefile_contents(butano_dir, project_id, common_dir, rom);
    fs::write(&path, contents).map_err(|e| Error::io("Failed to write", &path, e))?;
    Ok(path)
}

/// Make splits words on whitespace; escape it so paths survive.
fn escape_make_path(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn includes_the_butano_path() {
        let result = makefile_contents("/home/user/butano", "mygame", None, None);
        assert!(result.contains("LIBBUTANO     :=  /home/user/butano\n"));
    }

    #[test]
    fn derives_rom_fields_from_project_id() {
        let result = makefile_contents("/butano", "cool-game", None, None);
        assert!(result.contains("ROMTITLE      :=  COOLGAME\n"));
        assert!(result.contains("ROMCODE       :=  COOL\n"));
    }

    #[test]
    fn uses_explicit_rom_metadata() {
        let rom = RomMetadata {
            title: "MY GAME".to_string(),
            code: "ABCD".to_string(),
        };
        let result = makefile_contents("/butano", "mygame", None, Some(&rom));
        assert!(result.contains("ROMTITLE      :=  MY GAME\n"));
        assert!(result.contains("ROMCODE       :=  ABCD\n"));
    }

    #[test]
    fn escapes_whitespace_in_paths() {
        let result = makefile_contents("/home/my user/butano", "game", None, None);
        assert!(result.contains(r"LIBBUTANO     :=  /home/my\ user/butano"));
    }

    #[test]
    fn common_dir_extends_search_lists() {
        let result = makefile_contents("/butano", "game", Some("../common"), None);
        assert!(result.contains("INCLUDES      :=  include ../common/include\n"));
        assert!(result.contains("GRAPHICS      :=  graphics ../common/graphics\n"));
        assert!(result.contains("AUDIO         :=  audio ../common/audio\n"));
        assert!(result.contains("DMGAUDIO      :=  dmg_audio ../common/dmg_audio\n"));
    }

    #[test]
    fn plain_search_lists_without_common_dir() {
        let result = makefile_contents("/butano", "game", None, None);
        assert!(result.contains("INCLUDES      :=  include\n"));
        assert!(result.contains("GRAPHICS      :=  graphics\n"));
        assert!(result.contains("AUDIO         :=  audio\n"));
        assert!(result.contains("DMGAUDIO      :=  dmg_audio\n"));

        let empty_common = makefile_contents("/butano", "game", Some(""), None);
        assert_eq!(empty_common, result);
    }

    #[test]
    fn empty_variables_have_no_trailing_spaces() {
        let result = makefile_contents("/butano", "game", None, None);
        assert!(result.contains("\nDATA          :=\n"));
        assert!(result.contains("\nEXTTOOL       :=\n"));
        assert!(result.contains("DMGAUDIOBACKEND :=  default\n"));
    }

    #[test]
    fn ends_with_butano_include() {
        let result = makefile_contents("/butano", "game", None, None);
        assert!(result.contains("\texport LIBBUTANOABS\t:=\t$(realpath $(LIBBUTANO))\n"));
        assert!(result.ends_with("include $(LIBBUTANOABS)/butano.mak\n"));
        assert!(result.starts_with("#---"));
    }

    #[test]
    fn write_makefile_creates_file_in_target() {
        let dir = TempDir::new().unwrap();
        let path = write_makefile(dir.path(), "/butano", "game", None, None).unwrap();
        assert_eq!(path, dir.path().join("Makefile"));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("ROMCODE       :=  GAME\n"));
    }
}
