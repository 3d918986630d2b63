use crate::playback::domain::media_player::MediaPlayer;

/// A player parked at a fixed position. Used when the editor runs without
/// a real media surface (CLI, tests).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StillPlayer {
    time: f64,
    fullscreen: bool,
}

impl StillPlayer {
    pub fn new(time: f64) -> Self {
        Self {
            time,
            fullscreen: false,
        }
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }
}

impl MediaPlayer for StillPlayer {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek_to(&mut self, time: f64) {
        self.time = time.max(0.0);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}
