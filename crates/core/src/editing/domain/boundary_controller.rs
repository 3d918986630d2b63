use super::selection::Selection;
use super::snapping::SnapSettings;
use super::track_geometry::TrackGeometry;
use crate::history::domain::undo_history::UndoHistory;
use crate::segments::domain::boundary::Boundary;
use crate::segments::domain::edit_rejected::EditRejected;
use crate::segments::domain::segment_store::SegmentStore;
use crate::shared::constants::FINE_NUDGE_DIVISOR;

pub type PointerId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        pointer_id: PointerId,
        index: usize,
        boundary: Boundary,
        /// Boundary time after the most recent applied move.
        last_applied: f64,
    },
}

/// A finished drag. The boundary stays where the last move left it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCommit {
    pub index: usize,
    pub boundary: Boundary,
    pub time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Earlier,
    Later,
}

/// Turns pointer drags and keyboard nudges into constrained boundary writes.
///
/// Both input paths end in [`SegmentStore::set_boundary`], so neither can
/// commit a timeline that breaks the store's invariants. A drag belongs to
/// the pointer that started it; events from any other pointer are ignored
/// until that drag ends.
#[derive(Debug, Clone)]
pub struct BoundaryController {
    state: DragState,
    snap: SnapSettings,
}

impl BoundaryController {
    pub fn new(snap: SnapSettings) -> Self {
        Self {
            state: DragState::Idle,
            snap,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn snap(&self) -> &SnapSettings {
        &self.snap
    }

    pub fn snap_mut(&mut self) -> &mut SnapSettings {
        &mut self.snap
    }

    pub fn begin_drag(
        &mut self,
        pointer_id: PointerId,
        index: usize,
        boundary: Boundary,
        store: &SegmentStore,
        history: &mut UndoHistory,
        selection: &mut Selection,
    ) -> Result<(), EditRejected> {
        if self.is_dragging() {
            return Err(EditRejected::DragInProgress);
        }
        let segment = store.get(index).ok_or(EditRejected::IndexOutOfRange {
            index,
            len: store.len(),
        })?;
        let current = match boundary {
            Boundary::Start => segment.start,
            Boundary::End => segment.end,
        };

        history.push(store.segments());
        selection.select_boundary(index, boundary);
        self.state = DragState::Dragging {
            pointer_id,
            index,
            boundary,
            last_applied: current,
        };
        log::debug!("Drag started on segment {index} {boundary} by pointer {pointer_id}");
        Ok(())
    }

    /// Apply a pointer move. Returns the applied boundary time, or `None`
    /// when the event does not belong to the active drag.
    pub fn drag_move(
        &mut self,
        pointer_id: PointerId,
        x: f64,
        geometry: &TrackGeometry,
        store: &mut SegmentStore,
    ) -> Option<f64> {
        let DragState::Dragging {
            pointer_id: owner,
            index,
            boundary,
            ..
        } = self.state
        else {
            return None;
        };
        if owner != pointer_id {
            return None;
        }

        let time = geometry.time_at(x, store.duration());
        let neighbor = match boundary {
            Boundary::Start => store.previous_end(index),
            Boundary::End => store.next_start(index),
        };
        let proposed = self.snap.resolve(time, neighbor);
        let applied = store.set_boundary(index, boundary, proposed).ok()?;

        self.state = DragState::Dragging {
            pointer_id,
            index,
            boundary,
            last_applied: applied,
        };
        Some(applied)
    }

    /// Pointer release. Only the owning pointer can end its drag.
    pub fn end_drag(&mut self, pointer_id: PointerId) -> Option<DragCommit> {
        match self.state {
            DragState::Dragging { pointer_id: owner, .. } if owner == pointer_id => {
                self.release_all()
            }
            _ => None,
        }
    }

    /// Host fallback for a release that never arrived (capture lost, window
    /// blurred). Ends whatever drag is active at its last applied position.
    pub fn release_all(&mut self) -> Option<DragCommit> {
        let DragState::Dragging {
            index,
            boundary,
            last_applied,
            ..
        } = self.state
        else {
            return None;
        };
        self.state = DragState::Idle;
        log::debug!("Drag ended on segment {index} {boundary} at {last_applied:.3}s");
        Some(DragCommit {
            index,
            boundary,
            time: last_applied,
        })
    }

    /// Move the selected boundary one snap step (a tenth of one with
    /// `fine`). Each press is its own undo step. No magnet is applied.
    pub fn nudge(
        &mut self,
        direction: NudgeDirection,
        fine: bool,
        store: &mut SegmentStore,
        history: &mut UndoHistory,
        selection: &Selection,
    ) -> Result<f64, EditRejected> {
        if self.is_dragging() {
            return Err(EditRejected::DragInProgress);
        }
        let index = selection.index().ok_or(EditRejected::NoSelection)?;
        let boundary = selection
            .boundary()
            .ok_or(EditRejected::NoBoundarySelected)?;
        let segment = store.get(index).ok_or(EditRejected::IndexOutOfRange {
            index,
            len: store.len(),
        })?;

        let current = match boundary {
            Boundary::Start => segment.start,
            Boundary::End => segment.end,
        };
        let step = if fine {
            self.snap.snap_step() / FINE_NUDGE_DIVISOR
        } else {
            self.snap.snap_step()
        };
        let delta = match direction {
            NudgeDirection::Earlier => -step,
            NudgeDirection::Later => step,
        };

        // Round onto the fine grid so repeated presses do not drift.
        let per_second = FINE_NUDGE_DIVISOR / self.snap.snap_step();
        let proposed = ((current + delta) * per_second).round() / per_second;

        history.push(store.segments());
        store.set_boundary(index, boundary, proposed)
    }

    /// Flip the armed boundary. Refused mid-drag, where the selection must
    /// keep naming the boundary under the pointer.
    pub fn toggle_boundary(&self, selection: &mut Selection) -> Result<Boundary, EditRejected> {
        if self.is_dragging() {
            return Err(EditRejected::DragInProgress);
        }
        selection.toggle_boundary().ok_or(EditRejected::NoSelection)
    }
}

impl Default for BoundaryController {
    fn default() -> Self {
        Self::new(SnapSettings::default())
    }
}
