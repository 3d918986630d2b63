/// Domain interface for the media player the editor is attached to.
///
/// The editor never owns playback transport; it samples the position,
/// occasionally seeks, and reacts to player notifications.
pub trait MediaPlayer {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    fn seek_to(&mut self, time: f64);

    fn is_fullscreen(&self) -> bool;
}

/// Player notifications the synchronizer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    TimeAdvanced,
    Played,
    SeekCompleted,
    FullscreenChanged(bool),
}
