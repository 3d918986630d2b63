use thiserror::Error;

/// Reasons an editing request was turned down. A rejected request never
/// changes editor state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditRejected {
    #[error("segment index {index} out of range ({len} segments)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("time {0} is not a finite number")]
    NonFiniteTime(f64),
    #[error("split point {at} is not strictly inside [{start}, {end}]")]
    SplitOutsideSegment { at: f64, start: f64, end: f64 },
    #[error("split at {at} would leave a piece shorter than {min}s")]
    SplitTooShort { at: f64, min: f64 },
    #[error("no segment selected")]
    NoSelection,
    #[error("no boundary selected")]
    NoBoundarySelected,
    #[error("a drag is already in progress")]
    DragInProgress,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("snap step must be a positive number, got {0}")]
    InvalidSnapStep(f64),
}
