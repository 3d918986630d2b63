use super::caption_output::{CaptionOverlay, NativeCaptionTrack};
use super::media_player::{MediaPlayer, PlaybackEvent};
use crate::segments::domain::segment_store::SegmentStore;

/// What the player should be showing at one sampled instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionFrame {
    pub time: f64,
    pub active_index: Option<usize>,
    pub caption: Option<String>,
    pub overlay_visible: bool,
    pub native_track_enabled: bool,
}

/// Keeps the caption overlay and the native caption track in step with the
/// playback position.
///
/// Overlay and native track are mutually exclusive: in fullscreen the
/// overlay is hidden and the native track is enabled, otherwise the reverse.
/// The native track mirrors the committed segment list and is only rebuilt
/// when that list changes outside of a drag.
pub struct PlaybackSynchronizer {
    overlay: Box<dyn CaptionOverlay>,
    native_track: Box<dyn NativeCaptionTrack>,
    fullscreen: bool,
    synced_revision: Option<u64>,
    shown_caption: Option<String>,
    track_enabled: Option<bool>,
}

impl PlaybackSynchronizer {
    pub fn new(overlay: Box<dyn CaptionOverlay>, native_track: Box<dyn NativeCaptionTrack>) -> Self {
        Self {
            overlay,
            native_track,
            fullscreen: false,
            synced_revision: None,
            shown_caption: None,
            track_enabled: None,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// React to a player notification. Time-advance, play and seek-complete
    /// all mean "re-evaluate now"; a fullscreen change switches modes first.
    pub fn on_player_event(
        &mut self,
        event: PlaybackEvent,
        player: &dyn MediaPlayer,
        store: &SegmentStore,
        drag_in_progress: bool,
    ) -> CaptionFrame {
        if let PlaybackEvent::FullscreenChanged(fullscreen) = event {
            self.fullscreen = fullscreen;
        }
        self.evaluate(player.current_time(), store, drag_in_progress)
    }

    /// Recompute the caption state for `time`. Also called after editor
    /// re-renders so edits show up without waiting for the next tick.
    pub fn evaluate(
        &mut self,
        time: f64,
        store: &SegmentStore,
        drag_in_progress: bool,
    ) -> CaptionFrame {
        if !drag_in_progress && self.synced_revision != Some(store.revision()) {
            self.native_track.replace_cues(store.segments());
            self.synced_revision = Some(store.revision());
            log::debug!("Rebuilt native caption track with {} cues", store.len());
        }

        let active_index = store.active_index_at(time);
        let caption = active_index
            .and_then(|i| store.get(i))
            .map(|s| s.text.clone());

        let overlay_caption = if self.fullscreen {
            None
        } else {
            caption.clone()
        };
        if overlay_caption != self.shown_caption {
            match &overlay_caption {
                Some(text) => self.overlay.show(text),
                None => self.overlay.hide(),
            }
            self.shown_caption = overlay_caption;
        }

        if self.track_enabled != Some(self.fullscreen) {
            self.native_track.set_enabled(self.fullscreen);
            self.track_enabled = Some(self.fullscreen);
        }

        CaptionFrame {
            time,
            active_index,
            overlay_visible: self.shown_caption.is_some(),
            native_track_enabled: self.fullscreen,
            caption,
        }
    }
}
