/// One segment in its persisted form, with `HH:MM:SS,mmm` timecodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedCue {
    pub start: String,
    pub end: String,
    pub text: String,
}

/// Writes edited subtitles back to where they were loaded from.
pub trait SubtitleSaver {
    fn save(&mut self, name: &str, cues: &[TimedCue]) -> Result<(), Box<dyn std::error::Error>>;
}
