use std::io::{self, IsTerminal};

use igba_core::config::Environment;
use igba_core::doctor::{
    build_example, resolve_example_selection, run_checks, summarize, BuildOutcome, CheckResult,
    CheckStatus, ExampleSelection, DEVKITPRO_GUIDANCE,
};
use igba_core::paths::{default_butano_dir, expand_home};
use igba_core::prompt::{NonInteractive, Prompter};

use crate::args::DoctorArgs;
use crate::prompt::TerminalPrompter;
use crate::ui::{boxed, Color, Style};

pub fn run(args: DoctorArgs, env: &Environment, style: Style) -> anyhow::Result<()> {
    println!("┌  Init GBA Doctor");

    let butano_input = args
        .butano_path
        .clone()
        .unwrap_or_else(|| default_butano_dir(env).to_string_lossy().into_owned());
    let butano_base = expand_home(&butano_input, env.home.as_deref());
    let results = run_checks(env, &butano_base);

    println!();
    for result in &results {
        println!("{}", style.check_line(result));
    }

    if let Some(preset) = args.build_example {
        let mut terminal;
        let mut fallback = NonInteractive;
        let prompter: &mut dyn Prompter = if io::stdin().is_terminal() {
            terminal = TerminalPrompter::stdio();
            &mut terminal
        } else {
            &mut fallback
        };
        let selection = resolve_example_selection(
            preset,
            &butano_base,
            args.example_path.as_deref(),
            env,
            prompter,
        )?;
        if let Some(selection) = selection {
            report_build(&selection, style);
        }
    }

    println!();
    if args.devkitpro {
        println!("{}", boxed("devkitPro", DEVKITPRO_GUIDANCE));
        println!();
    }

    let summary = summarize(&results);
    println!(
        "{}",
        boxed(
            "Summary",
            &format!(
                "OK: {}\nWarnings: {}\nErrors: {}",
                summary.ok, summary.warn, summary.error
            ),
        )
    );
    if summary.error > 0 {
        println!(
            "{}",
            style.paint(Color::Yellow, "Fix the errors above and try again.")
        );
    }
    Ok(())
}

fn report_build(selection: &ExampleSelection, style: Style) {
    if selection.path.is_some() {
        println!("Building {}...", selection.label);
    }
    let line = match build_example(selection) {
        BuildOutcome::NotFound => style.check_line(&CheckResult {
            label: "Example build".to_string(),
            message: format!("{} not found", selection.label),
            status: CheckStatus::Warn,
        }),
        BuildOutcome::Succeeded => style.line(
            "✔",
            Color::Green,
            &format!("Example build succeeded ({})", selection.label),
            "",
        ),
        BuildOutcome::Failed => style.line(
            "✖",
            Color::Red,
            &format!("Example build failed ({})", selection.label),
            "",
        ),
    };
    println!("{line}");
}
