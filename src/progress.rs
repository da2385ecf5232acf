//! Stage narration hooks for the comparison pipeline

/// Receives human-readable narration as the pipeline moves through its stages
pub trait Progress {
    /// A stage is starting
    fn stage(&mut self, message: &str);

    /// The current stage finished successfully
    fn done(&mut self, message: &str);

    /// Informational remark that is neither a stage nor a result
    fn note(&mut self, message: &str) {
        let _ = message;
    }

    /// The run failed
    fn failed(&mut self, message: &str);
}

/// Discards all narration
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn stage(&mut self, _: &str) {}

    fn done(&mut self, _: &str) {}

    fn failed(&mut self, _: &str) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Progress;

    /// Records narration so tests can assert on the stage sequence
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub events: Vec<String>,
    }

    impl Progress for Recorder {
        fn stage(&mut self, message: &str) {
            self.events.push(format!("stage: {}", message));
        }

        fn done(&mut self, message: &str) {
            self.events.push(format!("done: {}", message));
        }

        fn note(&mut self, message: &str) {
            self.events.push(format!("note: {}", message));
        }

        fn failed(&mut self, message: &str) {
            self.events.push(format!("failed: {}", message));
        }
    }
}
