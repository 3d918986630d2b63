use super::edit_logger::{EditKind, EditLogger, NullEditLogger};
use super::timeline_view::TimelineView;
use crate::editing::domain::boundary_controller::{
    BoundaryController, DragCommit, DragState, NudgeDirection, PointerId,
};
use crate::editing::domain::selection::Selection;
use crate::editing::domain::snapping::SnapSettings;
use crate::editing::domain::track_geometry::TrackGeometry;
use crate::history::domain::undo_history::UndoHistory;
use crate::playback::domain::media_player::{MediaPlayer, PlaybackEvent};
use crate::playback::domain::playback_synchronizer::{CaptionFrame, PlaybackSynchronizer};
use crate::segments::domain::boundary::Boundary;
use crate::segments::domain::edit_rejected::EditRejected;
use crate::segments::domain::segment::Segment;
use crate::segments::domain::segment_store::SegmentStore;

/// Everything one open subtitle file needs while it is being edited.
///
/// Input handlers get the session by reference and reduce each event to a
/// call on it; no editing state lives anywhere else. Opening another file
/// means building a fresh session.
pub struct EditorSession {
    store: SegmentStore,
    history: UndoHistory,
    selection: Selection,
    controller: BoundaryController,
    geometry: TrackGeometry,
    /// Segment whose text field currently has focus, if any. Keystrokes into
    /// the same field share one undo snapshot.
    text_edit: Option<usize>,
    media: Option<String>,
    logger: Box<dyn EditLogger>,
}

impl EditorSession {
    pub fn new(snap: SnapSettings, logger: Box<dyn EditLogger>) -> Self {
        let store = SegmentStore::new();
        let mut history = UndoHistory::new();
        history.reset(store.segments());
        Self {
            store,
            history,
            selection: Selection::none(),
            controller: BoundaryController::new(snap),
            geometry: TrackGeometry::default(),
            text_edit: None,
            media: None,
            logger,
        }
    }

    /// Replace the timeline. Selection, undo history and any in-flight drag
    /// or text edit are discarded.
    pub fn load(&mut self, segments: Vec<Segment>, duration: f64, media: Option<String>) {
        self.controller.release_all();
        self.store.load(segments, duration);
        self.history.reset(self.store.segments());
        self.selection.clear();
        self.text_edit = None;
        self.media = media;
        self.logger.edit(EditKind::Load);
        self.logger.info(&format!(
            "Loaded {} segments ({:.2}s)",
            self.store.len(),
            self.store.duration()
        ));
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn drag_state(&self) -> DragState {
        self.controller.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn snap_step(&self) -> f64 {
        self.controller.snap().snap_step()
    }

    pub fn set_snap_step(&mut self, snap_step: f64) -> Result<(), EditRejected> {
        self.controller.snap_mut().set_snap_step(snap_step)
    }

    pub fn set_track_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    pub fn track_geometry(&self) -> TrackGeometry {
        self.geometry
    }

    pub fn logger(&self) -> &dyn EditLogger {
        self.logger.as_ref()
    }

    pub fn select_row(&mut self, index: usize) -> Result<(), EditRejected> {
        self.check_idle()?;
        self.check_index(index)?;
        self.finish_text_edit();
        self.selection.select_row(index);
        Ok(())
    }

    /// Arm a boundary directly, as clicking a handle without dragging would.
    pub fn select_boundary(&mut self, index: usize, boundary: Boundary) -> Result<(), EditRejected> {
        self.check_idle()?;
        self.check_index(index)?;
        self.finish_text_edit();
        self.selection.select_boundary(index, boundary);
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<(), EditRejected> {
        self.check_idle()?;
        self.selection.clear();
        Ok(())
    }

    // ── pointer ──────────────────────────────────────────────────────

    pub fn pointer_down(
        &mut self,
        pointer_id: PointerId,
        index: usize,
        boundary: Boundary,
    ) -> Result<(), EditRejected> {
        if !self.controller.is_dragging() {
            self.finish_text_edit();
        }
        let result = self.controller.begin_drag(
            pointer_id,
            index,
            boundary,
            &self.store,
            &mut self.history,
            &mut self.selection,
        );
        self.note_rejection(EditKind::Drag, result)
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, x: f64) -> Option<f64> {
        self.controller
            .drag_move(pointer_id, x, &self.geometry, &mut self.store)
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId) -> Option<DragCommit> {
        let commit = self.controller.end_drag(pointer_id)?;
        self.logger.edit(EditKind::Drag);
        Some(commit)
    }

    /// Fallback for a release the host never delivered.
    pub fn release_all_pointers(&mut self) -> Option<DragCommit> {
        let commit = self.controller.release_all()?;
        self.logger.edit(EditKind::Drag);
        Some(commit)
    }

    // ── keyboard ─────────────────────────────────────────────────────

    pub fn nudge(&mut self, direction: NudgeDirection, fine: bool) -> Result<f64, EditRejected> {
        self.finish_text_edit();
        let result = self.controller.nudge(
            direction,
            fine,
            &mut self.store,
            &mut self.history,
            &self.selection,
        );
        self.record(EditKind::Nudge, result)
    }

    pub fn toggle_boundary(&mut self) -> Result<Boundary, EditRejected> {
        self.controller.toggle_boundary(&mut self.selection)
    }

    /// Set one boundary to a typed time. Clamped to the legal range like a
    /// drag, but neither snapped nor pulled onto a neighbor. One undo step.
    pub fn set_boundary_time(
        &mut self,
        index: usize,
        boundary: Boundary,
        time: f64,
    ) -> Result<f64, EditRejected> {
        let result = self.apply_boundary_time(index, boundary, time);
        self.record(EditKind::Retime, result)
    }

    fn apply_boundary_time(
        &mut self,
        index: usize,
        boundary: Boundary,
        time: f64,
    ) -> Result<f64, EditRejected> {
        self.check_idle()?;
        self.check_index(index)?;
        if !time.is_finite() {
            return Err(EditRejected::NonFiniteTime(time));
        }
        self.finish_text_edit();
        self.history.push(self.store.segments());
        self.store.set_boundary(index, boundary, time)
    }

    // ── text ─────────────────────────────────────────────────────────

    /// Replace the text of `index`. The first change after focusing a field
    /// snapshots for undo; later keystrokes in the same field do not.
    pub fn edit_text(&mut self, index: usize, text: &str) -> Result<(), EditRejected> {
        let result = self.apply_text(index, text);
        self.note_rejection(EditKind::Text, result)
    }

    fn apply_text(&mut self, index: usize, text: &str) -> Result<(), EditRejected> {
        self.check_idle()?;
        self.check_index(index)?;
        if self.text_edit != Some(index) {
            self.finish_text_edit();
            self.history.push(self.store.segments());
            self.text_edit = Some(index);
        }
        self.store.set_text(index, text)
    }

    /// The text field lost focus; the next keystroke starts a new undo step.
    pub fn finish_text_edit(&mut self) {
        if self.text_edit.take().is_some() {
            self.logger.edit(EditKind::Text);
        }
    }

    // ── structural edits ─────────────────────────────────────────────

    pub fn split(&mut self, index: usize, at: f64) -> Result<usize, EditRejected> {
        let result = self.commit_structural(|store| store.split(index, at));
        self.record(EditKind::Split, result)
    }

    pub fn delete(&mut self, index: usize) -> Result<Segment, EditRejected> {
        let result = self.commit_structural(|store| store.delete(index));
        if result.is_ok() {
            self.selection.on_segment_removed(index);
        }
        self.record(EditKind::Delete, result)
    }

    /// Restore the state preceding the most recent committed edit.
    pub fn undo(&mut self) -> Result<(), EditRejected> {
        let result = self.apply_undo();
        self.record(EditKind::Undo, result)
    }

    fn apply_undo(&mut self) -> Result<(), EditRejected> {
        self.check_idle()?;
        self.finish_text_edit();
        let previous = self
            .history
            .undo(self.store.segments())
            .ok_or(EditRejected::NothingToUndo)?;
        self.store.restore(previous);
        if self
            .selection
            .index()
            .is_some_and(|i| i >= self.store.len())
        {
            self.selection.clear();
        }
        Ok(())
    }

    // ── playback ─────────────────────────────────────────────────────

    /// Seek the player to the start of `index`. Returns the seek target.
    pub fn play_segment(
        &self,
        index: usize,
        player: &mut dyn MediaPlayer,
    ) -> Result<f64, EditRejected> {
        let start = self
            .store
            .get(index)
            .map(|s| s.start)
            .ok_or(EditRejected::IndexOutOfRange {
                index,
                len: self.store.len(),
            })?;
        player.seek_to(start);
        Ok(start)
    }

    pub fn sync_playback(
        &self,
        synchronizer: &mut PlaybackSynchronizer,
        event: PlaybackEvent,
        player: &dyn MediaPlayer,
    ) -> CaptionFrame {
        synchronizer.on_player_event(event, player, &self.store, self.is_dragging())
    }

    /// Re-evaluate captions after an edit, without waiting for a player tick.
    pub fn refresh_captions(
        &self,
        synchronizer: &mut PlaybackSynchronizer,
        time: f64,
    ) -> CaptionFrame {
        synchronizer.evaluate(time, &self.store, self.is_dragging())
    }

    pub fn render(&self) -> TimelineView {
        TimelineView::project(&self.store, &self.selection, self.controller.state())
    }

    pub fn finish(&mut self) {
        self.finish_text_edit();
        self.release_all_pointers();
        self.logger.summary();
    }

    // ── helpers ──────────────────────────────────────────────────────

    /// Run a split/delete. The pre-edit snapshot is only kept when the edit
    /// goes through, so rejected requests leave no empty undo steps.
    fn commit_structural<T>(
        &mut self,
        edit: impl FnOnce(&mut SegmentStore) -> Result<T, EditRejected>,
    ) -> Result<T, EditRejected> {
        self.check_idle()?;
        self.finish_text_edit();
        let before = self.store.segments().to_vec();
        let value = edit(&mut self.store)?;
        self.history.push(&before);
        Ok(value)
    }

    fn check_idle(&self) -> Result<(), EditRejected> {
        if self.controller.is_dragging() {
            Err(EditRejected::DragInProgress)
        } else {
            Ok(())
        }
    }

    fn check_index(&self, index: usize) -> Result<(), EditRejected> {
        if index < self.store.len() {
            Ok(())
        } else {
            Err(EditRejected::IndexOutOfRange {
                index,
                len: self.store.len(),
            })
        }
    }

    fn record<T>(
        &mut self,
        kind: EditKind,
        result: Result<T, EditRejected>,
    ) -> Result<T, EditRejected> {
        match &result {
            Ok(_) => self.logger.edit(kind),
            Err(reason) => self.logger.rejected(kind, reason),
        }
        result
    }

    fn note_rejection<T>(
        &mut self,
        kind: EditKind,
        result: Result<T, EditRejected>,
    ) -> Result<T, EditRejected> {
        if let Err(reason) = &result {
            self.logger.rejected(kind, reason);
        }
        result
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SnapSettings::default(), Box::new(NullEditLogger))
    }
}
