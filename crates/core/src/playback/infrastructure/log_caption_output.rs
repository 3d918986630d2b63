use crate::playback::domain::caption_output::{CaptionOverlay, NativeCaptionTrack};
use crate::segments::domain::segment::Segment;
use crate::shared::timecode::format_timecode;

/// Headless overlay that reports caption changes through the `log` crate
/// and remembers what is currently on screen.
#[derive(Debug, Default)]
pub struct LogCaptionOverlay {
    visible: Option<String>,
}

impl LogCaptionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> Option<&str> {
        self.visible.as_deref()
    }
}

impl CaptionOverlay for LogCaptionOverlay {
    fn show(&mut self, text: &str) {
        log::info!("Caption: {text}");
        self.visible = Some(text.to_string());
    }

    fn hide(&mut self) {
        log::info!("Caption hidden");
        self.visible = None;
    }
}

/// Headless native track: keeps the cue list and logs rebuilds.
#[derive(Debug, Default)]
pub struct LogNativeCaptionTrack {
    cues: Vec<Segment>,
    enabled: bool,
}

impl LogNativeCaptionTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[Segment] {
        &self.cues
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl NativeCaptionTrack for LogNativeCaptionTrack {
    fn replace_cues(&mut self, cues: &[Segment]) {
        self.cues = cues.to_vec();
        if let (Some(first), Some(last)) = (cues.first(), cues.last()) {
            log::debug!(
                "Native track: {} cues from {} to {}",
                cues.len(),
                format_timecode(first.start),
                format_timecode(last.end)
            );
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        log::debug!("Native track {}", if enabled { "enabled" } else { "disabled" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_tracks_visible_text() {
        let mut o = LogCaptionOverlay::new();
        assert_eq!(o.visible(), None);
        o.show("hi");
        assert_eq!(o.visible(), Some("hi"));
        o.hide();
        assert_eq!(o.visible(), None);
    }

    #[test]
    fn test_track_keeps_cues_and_enabled_flag() {
        let mut t = LogNativeCaptionTrack::new();
        t.replace_cues(&[Segment::new(0.0, 1.0, "a")]);
        t.set_enabled(true);
        assert_eq!(t.cues().len(), 1);
        assert!(t.is_enabled());
    }
}
