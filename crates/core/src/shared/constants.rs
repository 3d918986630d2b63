/// Shortest segment the editor will ever commit, in seconds.
pub const MIN_SEGMENT_DURATION: f64 = 0.05;

/// Distance (seconds) within which a dragged boundary lands exactly on the
/// touching boundary of its neighbor instead of the snapped grid value.
pub const MAGNET_THRESHOLD: f64 = 0.02;

pub const DEFAULT_SNAP_STEP: f64 = 0.1;

/// Fine keyboard nudges move by `snap_step / FINE_NUDGE_DIVISOR`.
pub const FINE_NUDGE_DIVISOR: f64 = 10.0;

/// Max snapshots kept by the undo history (oldest discarded first).
pub const UNDO_LIMIT: usize = 50;

pub const SNAP_STEP_SETTING_KEY: &str = "subtitle_editor.snap_step";

/// Tolerance used when comparing snapped times against magnet targets.
pub const TIME_EPSILON: f64 = 1e-9;
