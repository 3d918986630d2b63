use serde::Serialize;

use crate::editing::domain::boundary_controller::DragState;
use crate::editing::domain::selection::Selection;
use crate::segments::domain::boundary::Boundary;
use crate::segments::domain::segment_store::SegmentStore;

/// One segment as a bar on the track. `left` and `width` are fractions of
/// the timeline duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentBar {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub left: f64,
    pub width: f64,
    pub text: String,
    pub selected: bool,
    pub active_boundary: Option<Boundary>,
}

/// Time span the armed boundary cannot reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForbiddenZone {
    pub start: f64,
    pub end: f64,
}

/// Renderer-agnostic description of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineView {
    pub duration: f64,
    pub bars: Vec<SegmentBar>,
    /// Time of the boundary being dragged.
    pub guide_line: Option<f64>,
    pub forbidden_zones: Vec<ForbiddenZone>,
}

impl TimelineView {
    pub fn project(store: &SegmentStore, selection: &Selection, drag: DragState) -> Self {
        let duration = store.duration();
        let fraction = |t: f64| if duration > 0.0 { t / duration } else { 0.0 };

        let bars = store
            .segments()
            .iter()
            .enumerate()
            .map(|(index, s)| {
                let selected = selection.is_selected(index);
                SegmentBar {
                    index,
                    start: s.start,
                    end: s.end,
                    left: fraction(s.start),
                    width: fraction(s.duration()),
                    text: s.text.clone(),
                    selected,
                    active_boundary: if selected { selection.boundary() } else { None },
                }
            })
            .collect();

        let guide_line = match drag {
            DragState::Dragging { last_applied, .. } => Some(last_applied),
            DragState::Idle => None,
        };

        Self {
            duration,
            bars,
            guide_line,
            forbidden_zones: forbidden_zones(store, selection),
        }
    }

    /// JSON form for renderers living outside the process.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn forbidden_zones(store: &SegmentStore, selection: &Selection) -> Vec<ForbiddenZone> {
    let (Some(index), Some(boundary)) = (selection.index(), selection.boundary()) else {
        return Vec::new();
    };
    let Ok((lo, hi)) = store.legal_range(index, boundary) else {
        return Vec::new();
    };

    let mut zones = Vec::with_capacity(2);
    if lo > 0.0 {
        zones.push(ForbiddenZone { start: 0.0, end: lo });
    }
    if hi < store.duration() {
        zones.push(ForbiddenZone {
            start: hi,
            end: store.duration(),
        });
    }
    zones
}
