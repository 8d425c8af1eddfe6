use std::io::{self, IsTerminal};

use anyhow::Context;
use igba_core::config::{load_create_options, CreateOptions, Environment};
use igba_core::create::{create_project, CreateSummary};
use igba_core::prompt::NonInteractive;

use crate::args::CreateArgs;
use crate::prompt::TerminalPrompter;
use crate::ui::{boxed, Color, Style, TerminalReporter};

pub fn run(args: CreateArgs, env: &Environment, style: Style) -> anyhow::Result<()> {
    let file_options = match &args.config {
        Some(path) => load_create_options(path)?,
        None => CreateOptions::default(),
    };
    let options = file_options.overlay(args.options);
    let non_interactive = options.non_interactive || options.yes || !io::stdin().is_terminal();
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    log::debug!("create options: {options:?}");

    println!("┌  init-gba: new Butano project");
    println!();

    let mut reporter = TerminalReporter::new(style);
    let summary = if non_interactive {
        create_project(&options, env, &cwd, &mut NonInteractive, &mut reporter)
    } else {
        create_project(
            &options,
            env,
            &cwd,
            &mut TerminalPrompter::stdio(),
            &mut reporter,
        )
    }
    .context("Project creation failed")?;

    print_summary(&summary, style);
    Ok(())
}

fn print_summary(summary: &CreateSummary, style: Style) {
    let target = summary.target_dir.display();
    println!("{} Done!", style.paint(Color::Green, "✔"));
    println!("Project created at: {target}");
    if summary.changed_files > 0 {
        println!("Updated files: {}", summary.changed_files);
    }
    println!();
    println!(
        "{}",
        boxed(
            "Summary",
            &format!("Project: {target}\n\nNext steps:\ncd {target}\nmake"),
        )
    );
}
