use std::io::{self, BufRead, Write};

use igba_core::prompt::Prompter;
use igba_core::{Error, Result};

/// Line-based prompts on stdin/stdout. End of input cancels the operation.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "? {question} ")
            .and_then(|_| self.output.flush())
            .map_err(|e| Error::io("Failed to write", "stdout", e))?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::io("Failed to read", "stdin", e))?;
        if read == 0 {
            let _ = writeln!(self.output);
            return Err(Error::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").map_err(|e| Error::io("Failed to write", "stdout", e))
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let answer = self.ask(&format!("{message} {hint}"))?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer yes or no.")?,
            }
        }
    }

    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let question = match default {
            Some(value) => format!("{message} ({value})"),
            None => message.to_string(),
        };
        loop {
            let answer = self.ask(&question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if let Some(value) = default {
                return Ok(value.to_string());
            }
            self.say("Value is required")?;
        }
    }

    fn select(&mut self, message: &str, options: &[&str]) -> Result<usize> {
        self.say(&format!("? {message}"))?;
        for (index, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {option}", index + 1))?;
        }
        loop {
            let answer = self.ask(&format!("Choose 1-{}:", options.len()))?;
            match answer.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(choice - 1),
                _ => self.say("Please enter one of the listed numbers.")?,
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn confirm_uses_default_on_empty_line() {
        let mut p = prompter("\n\n");
        assert!(p.confirm("Download?", true).unwrap());
        assert!(!p.confirm("Update?", false).unwrap());
        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("? Download? (Y/n) "));
        assert!(shown.contains("? Update? (y/N) "));
    }

    #[test]
    fn confirm_reprompts_on_garbage() {
        let mut p = prompter("maybe\nYES\n");
        assert!(p.confirm("Continue?", false).unwrap());
        assert!(String::from_utf8(p.output)
            .unwrap()
            .contains("Please answer yes or no."));
    }

    #[test]
    fn text_trims_and_falls_back() {
        let mut p = prompter("  MyGame  \n\n");
        assert_eq!(p.text("Name", None).unwrap(), "MyGame");
        assert_eq!(p.text("Project directory", Some("/tmp/x")).unwrap(), "/tmp/x");
    }

    #[test]
    fn text_without_default_requires_value() {
        let mut p = prompter("\nvalue\n");
        assert_eq!(p.text("Custom example path", None).unwrap(), "value");
        assert!(String::from_utf8(p.output)
            .unwrap()
            .contains("Value is required"));
    }

    #[test]
    fn end_of_input_cancels() {
        let mut p = prompter("");
        assert!(matches!(p.confirm("Continue?", true), Err(Error::Cancelled)));
    }

    #[test]
    fn select_returns_zero_based_index() {
        let mut p = prompter("7\n2\n");
        let choice = p.select("Pick", &["a", "b", "c"]).unwrap();
        assert_eq!(choice, 1);
        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("  3) c"));
    }
}
