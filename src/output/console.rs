//! Colored stage narration on stderr

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::progress::Progress;

/// Narrates pipeline stages: yellow when a stage starts, green when it
/// succeeds, bold red on failure
pub struct ConsoleReporter {
    stream: StandardStream,
}

impl ConsoleReporter {
    pub fn new(color_choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(color_choice),
        }
    }

    fn emit(&mut self, spec: &ColorSpec, prefix: &str, message: &str) {
        // Narration is best effort; a closed stderr must not fail the run
        let _ = self.stream.set_color(spec);
        let _ = writeln!(self.stream, "{}{}", prefix, message);
        let _ = self.stream.reset();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl Progress for ConsoleReporter {
    fn stage(&mut self, message: &str) {
        self.emit(ColorSpec::new().set_fg(Some(Color::Yellow)), "", message);
    }

    fn done(&mut self, message: &str) {
        self.emit(ColorSpec::new().set_fg(Some(Color::Green)), "✔ ", message);
    }

    fn note(&mut self, message: &str) {
        self.emit(ColorSpec::new().set_fg(Some(Color::Green)), "", message);
    }

    fn failed(&mut self, message: &str) {
        self.emit(
            ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true),
            "✘ ",
            message,
        );
    }
}
