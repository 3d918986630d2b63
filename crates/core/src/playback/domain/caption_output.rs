use crate::segments::domain::segment::Segment;

/// Caption box drawn over the player while not in fullscreen.
pub trait CaptionOverlay {
    fn show(&mut self, text: &str);
    fn hide(&mut self);
}

/// Platform caption track rendered natively in fullscreen presentation.
pub trait NativeCaptionTrack {
    /// Replace every cue with the committed segment list.
    fn replace_cues(&mut self, cues: &[Segment]);
    fn set_enabled(&mut self, enabled: bool);
}
