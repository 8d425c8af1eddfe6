//! `init-gba`: scaffold Butano GBA projects and diagnose the toolchain.

mod args;
mod commands;
mod prompt;
mod ui;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use igba_core::config::Environment;

use args::Command;
use ui::{Color, Style};

fn main() -> ExitCode {
    let cli = match args::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let env = Environment::capture();
    let style = Style {
        enabled: io::stdout().is_terminal() && !env.no_color,
    };

    let result = match cli.command {
        Command::Help => {
            println!("{}", args::usage());
            Ok(())
        }
        Command::Version => {
            println!("init-gba {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Create(create) => commands::create::run(create, &env, style),
        Command::Doctor(doctor) => commands::doctor::run(doctor, &env, style),
    };

    if let Err(err) = result {
        log::debug!("command failed: {err:?}");
        eprintln!("{} {err:#}", style.paint(Color::Red, "✖"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
