use crate::segments::domain::segment::Segment;

/// Raw contents of one subtitle resource, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedSubtitles {
    pub segments: Vec<Segment>,
    /// Length of the media in seconds, when the source knows it.
    pub duration: Option<f64>,
    /// Media file the subtitles belong to.
    pub media: Option<String>,
}

/// Abstracts where subtitle segments come from (SRT file, remote API, ...).
pub trait SubtitleLoader {
    fn load(&mut self, name: &str) -> Result<LoadedSubtitles, Box<dyn std::error::Error>>;
}
