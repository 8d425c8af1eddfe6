//! Terminal rendering: progress lines, boxes, and ANSI colour.

use igba_core::doctor::{CheckResult, CheckStatus};
use igba_core::report::{Reporter, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Gray,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Red => "31",
            Self::Gray => "90",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub enabled: bool,
}

impl Style {
    pub fn paint(self, color: Color, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{text}\x1b[0m", color.code())
        } else {
            text.to_string()
        }
    }

    pub fn line(self, icon: &str, color: Color, label: &str, detail: &str) -> String {
        let detail = if detail.is_empty() {
            String::new()
        } else {
            self.paint(Color::Gray, &format!(" — {detail}"))
        };
        format!("{} {label}{detail}", self.paint(color, icon))
    }

    pub fn check_line(self, result: &CheckResult) -> String {
        let (icon, color) = match result.status {
            CheckStatus::Ok => ("✔", Color::Green),
            CheckStatus::Warn => ("!", Color::Yellow),
            CheckStatus::Error => ("✖", Color::Red),
        };
        self.line(icon, color, &result.label, &result.message)
    }
}

/// Draws `body` inside a rounded box with `title` set into the top border.
pub fn boxed(title: &str, body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let title_width = title.chars().count() + 2;
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(title_width);

    let mut out = format!("╭ {title} {}╮\n", "─".repeat(width + 2 - title_width));
    for line in &lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("│ {line}{} │\n", " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯", "─".repeat(width + 2)));
    out
}

/// Prints scaffolding progress to stdout.
pub struct TerminalReporter {
    style: Style,
}

impl TerminalReporter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }
}

impl Reporter for TerminalReporter {
    fn progress(&mut self, label: &str, detail: &str, status: Status) {
        let (icon, color) = match status {
            Status::Success => ("✔", Color::Green),
            Status::Skip => ("•", Color::Gray),
            Status::Warning => ("!", Color::Yellow),
        };
        println!("{}", self.style.line(icon, color, label, detail));
    }

    fn message(&mut self, text: &str) {
        println!("{text}");
    }

    fn note(&mut self, title: &str, body: &str) {
        println!(
            "{} {title}: {}",
            self.style.paint(Color::Yellow, "!"),
            body.replace('\n', " ")
        );
    }
}
