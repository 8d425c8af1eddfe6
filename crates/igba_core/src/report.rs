/// Outcome attached to a progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Skip,
    Warning,
}

/// User-facing output sink for the scaffolding flow. Diagnostics that only
/// matter when debugging go through `log` instead.
pub trait Reporter {
    /// One progress line per completed step, rendered as label, separator, detail.
    fn progress(&mut self, label: &str, detail: &str, status: Status);

    /// Free-form line, e.g. instructions printed mid-flow.
    fn message(&mut self, text: &str);

    /// Titled block of text that deserves visual separation.
    fn note(&mut self, title: &str, body: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        pub progress: Vec<(String, String, Status)>,
        pub messages: Vec<String>,
        pub notes: Vec<(String, String)>,
    }

    impl RecordingReporter {
        pub fn detail_for(&self, label: &str) -> Option<(&str, Status)> {
            self.progress
                .iter()
                .find(|(l, _, _)| l == label)
                .map(|(_, d, s)| (d.as_str(), *s))
        }
    }

    impl Reporter for RecordingReporter {
        fn progress(&mut self, label: &str, detail: &str, status: Status) {
            self.progress
                .push((label.to_string(), detail.to_string(), status));
        }

        fn message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }

        fn note(&mut self, title: &str, body: &str) {
            self.notes.push((title.to_string(), body.to_string()));
        }
    }
}
