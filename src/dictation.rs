/// Speech dictation capability: begin capturing transcribed speech, stop
/// capturing, and read the live transcript while active.
///
/// The editor owns the exclusivity rules (one captured field at a time);
/// implementations only manage the capture session and the transcript buffer.
pub trait Dictation {
    fn start_capture(&mut self, continuous: bool);
    fn stop_capture(&mut self);
    fn is_capturing(&self) -> bool;

    /// The transcript accumulated since capture last started
    fn transcript(&self) -> &str;

    /// Clear the transcript buffer (done on every capture start)
    fn reset_transcript(&mut self);
}

/// Stand-in for hosts without a speech backend: capture toggles but the
/// transcript stays empty.
#[derive(Default)]
pub struct NullDictation {
    capturing: bool,
}

impl Dictation for NullDictation {
    fn start_capture(&mut self, _continuous: bool) {
        self.capturing = true;
    }

    fn stop_capture(&mut self) {
        self.capturing = false;
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn transcript(&self) -> &str {
        ""
    }

    fn reset_transcript(&mut self) {}
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Scripted dictation: tests push transcript text while capture is active
    #[derive(Default)]
    pub struct ScriptedDictation {
        capturing: bool,
        transcript: String,
        pub resets: usize,
    }

    impl ScriptedDictation {
        pub fn new() -> Self {
            Self::default()
        }

        /// Simulate the speech backend emitting a transcript update
        pub fn emit(&mut self, text: &str) {
            if self.capturing {
                self.transcript = text.to_string();
            }
        }
    }

    impl Dictation for ScriptedDictation {
        fn start_capture(&mut self, _continuous: bool) {
            self.capturing = true;
        }

        fn stop_capture(&mut self) {
            self.capturing = false;
        }

        fn is_capturing(&self) -> bool {
            self.capturing
        }

        fn transcript(&self) -> &str {
            &self.transcript
        }

        fn reset_transcript(&mut self) {
            self.transcript.clear();
            self.resets += 1;
        }
    }
}
