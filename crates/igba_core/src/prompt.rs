use crate::{Error, Result};

/// Questions the scaffolding flow may ask. The terminal implementation lives in
/// the binary; [`NonInteractive`] answers everything with defaults.
pub trait Prompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Returns the trimmed answer. An empty answer falls back to `default`;
    /// with no default the answer is required.
    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Returns the index of the chosen option.
    fn select(&mut self, message: &str, options: &[&str]) -> Result<usize>;

    fn is_interactive(&self) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn confirm(&mut self, _message: &str, default: bool) -> Result<bool> {
        Ok(default)
    }

    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        default
            .map(str::to_string)
            .ok_or_else(|| Error::MissingInput(message.to_string()))
    }

    fn select(&mut self, message: &str, _options: &[&str]) -> Result<usize> {
        Err(Error::MissingInput(message.to_string()))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Resolves a value supplied on the command line, asking only when it is
/// absent or blank.
pub fn resolve_text(
    value: Option<&str>,
    prompter: &mut dyn Prompter,
    message: &str,
    default: Option<&str>,
) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => prompter.text(message, default),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;

    /// Answers from a queue and records every question asked. When the queue
    /// runs dry it falls back to the defaults.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub confirms: VecDeque<bool>,
        pub texts: VecDeque<String>,
        pub selections: VecDeque<usize>,
        pub asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn confirming(answers: &[bool]) -> Self {
            Self {
                confirms: answers.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
            self.asked.push(message.to_string());
            Ok(self.confirms.pop_front().unwrap_or(default))
        }

        fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
            self.asked.push(message.to_string());
            match self.texts.pop_front() {
                Some(answer) => Ok(answer),
                None => NonInteractive.text(message, default),
            }
        }

        fn select(&mut self, message: &str, _options: &[&str]) -> Result<usize> {
            self.asked.push(message.to_string());
            self.selections
                .pop_front()
                .ok_or_else(|| Error::MissingInput(message.to_string()))
        }

        fn is_interactive(&self) -> bool {
            true
        }
    }
}
