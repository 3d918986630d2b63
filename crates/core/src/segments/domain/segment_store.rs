use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use super::boundary::Boundary;
use super::edit_rejected::EditRejected;
use super::segment::Segment;
use crate::shared::constants::{MIN_SEGMENT_DURATION, TIME_EPSILON};

/// A broken timeline invariant, reported by [`SegmentStore::check_invariants`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("segment {index} starts before zero")]
    NegativeStart { index: usize },
    #[error("segment {index} is shorter than the minimum duration")]
    TooShort { index: usize },
    #[error("segment {index} ends after the timeline duration")]
    PastDuration { index: usize },
    #[error("segment {index} overlaps the segment after it")]
    Overlap { index: usize },
}

/// Revisions are drawn from one process-wide sequence, so two stores never
/// report the same revision for different contents.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Owns the ordered caption segments and the timeline duration.
///
/// Every mutation goes through this type, and every successful one leaves
/// the list ordered, non-overlapping, inside `[0, duration]`, and with no
/// segment shorter than [`MIN_SEGMENT_DURATION`].
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    duration: f64,
    revision: u64,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole timeline with untrusted loader output.
    ///
    /// Malformed timings are corrected rather than refused: negative or
    /// non-finite times clamp to zero, too-short segments are extended to the
    /// minimum, overlaps are resolved against the previous segment, and the
    /// duration grows to cover the last segment.
    pub fn load(&mut self, segments: Vec<Segment>, duration: f64) {
        let segments = normalize(segments);
        let last_end = segments.last().map_or(0.0, |s| s.end);
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };

        self.segments = segments;
        self.duration = duration.max(last_end);
        self.revision = next_revision();
        log::debug!(
            "Loaded {} segments over {:.3}s",
            self.segments.len(),
            self.duration
        );
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Bumped by every mutation that changes the segment list.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), EditRejected> {
        let text = text.into();
        let segment = self.segment_mut(index)?;
        if segment.text != text {
            segment.text = text;
            self.revision = next_revision();
        }
        Ok(())
    }

    /// Time span one boundary of `index` may occupy without breaking any
    /// invariant: `[previous end, end - min]` for a start and
    /// `[start + min, next start]` for an end. The timeline edges stand in for
    /// missing neighbors.
    pub fn legal_range(&self, index: usize, side: Boundary) -> Result<(f64, f64), EditRejected> {
        let segment = self.segment(index)?;
        let (lo, hi) = match side {
            Boundary::Start => (
                self.previous_end(index).unwrap_or(0.0),
                segment.end - MIN_SEGMENT_DURATION,
            ),
            Boundary::End => (
                segment.start + MIN_SEGMENT_DURATION,
                self.next_start(index).unwrap_or(self.duration),
            ),
        };
        Ok((lo, hi.max(lo)))
    }

    /// End of the segment before `index`, if there is one.
    pub fn previous_end(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(1)
            .and_then(|i| self.segments.get(i))
            .map(|s| s.end)
    }

    /// Start of the segment after `index`, if there is one.
    pub fn next_start(&self, index: usize) -> Option<f64> {
        self.segments.get(index + 1).map(|s| s.start)
    }

    /// Move one boundary of `index` toward `proposed`, clamped to its legal
    /// range. Returns the time actually applied.
    pub fn set_boundary(
        &mut self,
        index: usize,
        side: Boundary,
        proposed: f64,
    ) -> Result<f64, EditRejected> {
        if !proposed.is_finite() {
            return Err(EditRejected::NonFiniteTime(proposed));
        }
        let (lo, hi) = self.legal_range(index, side)?;
        let applied = proposed.clamp(lo, hi);

        let segment = self.segment_mut(index)?;
        let slot = match side {
            Boundary::Start => &mut segment.start,
            Boundary::End => &mut segment.end,
        };
        if *slot != applied {
            *slot = applied;
            self.revision = next_revision();
        }
        Ok(applied)
    }

    /// Cut `index` in two at `at`. Both pieces keep the original text.
    /// Returns the index of the new second piece.
    pub fn split(&mut self, index: usize, at: f64) -> Result<usize, EditRejected> {
        if !at.is_finite() {
            return Err(EditRejected::NonFiniteTime(at));
        }
        let segment = self.segment(index)?;
        if !(segment.start < at && at < segment.end) {
            return Err(EditRejected::SplitOutsideSegment {
                at,
                start: segment.start,
                end: segment.end,
            });
        }
        if at - segment.start + TIME_EPSILON < MIN_SEGMENT_DURATION
            || segment.end - at + TIME_EPSILON < MIN_SEGMENT_DURATION
        {
            return Err(EditRejected::SplitTooShort {
                at,
                min: MIN_SEGMENT_DURATION,
            });
        }

        let tail = Segment::new(at, segment.end, segment.text.clone());
        self.segments[index].end = at;
        self.segments.insert(index + 1, tail);
        self.revision = next_revision();
        Ok(index + 1)
    }

    /// Remove `index`. Neighbors keep their timing, so a gap may remain.
    pub fn delete(&mut self, index: usize) -> Result<Segment, EditRejected> {
        self.segment(index)?;
        let removed = self.segments.remove(index);
        self.revision = next_revision();
        Ok(removed)
    }

    /// First segment whose closed interval contains `time`. At an instant
    /// shared by two touching segments the earlier one wins.
    pub fn active_index_at(&self, time: f64) -> Option<usize> {
        self.segments.iter().position(|s| s.contains(time))
    }

    /// Put back a list captured earlier from this store (undo).
    pub(crate) fn restore(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
        self.revision = next_revision();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.start < 0.0 {
                return Err(InvariantViolation::NegativeStart { index });
            }
            if segment.duration() + TIME_EPSILON < MIN_SEGMENT_DURATION {
                return Err(InvariantViolation::TooShort { index });
            }
            if segment.end > self.duration + TIME_EPSILON {
                return Err(InvariantViolation::PastDuration { index });
            }
            if let Some(next) = self.segments.get(index + 1) {
                if segment.end > next.start + TIME_EPSILON {
                    return Err(InvariantViolation::Overlap { index });
                }
            }
        }
        Ok(())
    }

    fn segment(&self, index: usize) -> Result<&Segment, EditRejected> {
        let len = self.segments.len();
        self.segments
            .get(index)
            .ok_or(EditRejected::IndexOutOfRange { index, len })
    }

    fn segment_mut(&mut self, index: usize) -> Result<&mut Segment, EditRejected> {
        let len = self.segments.len();
        self.segments
            .get_mut(index)
            .ok_or(EditRejected::IndexOutOfRange { index, len })
    }
}

fn sanitize_time(t: f64) -> f64 {
    if t.is_finite() {
        t.max(0.0)
    } else {
        0.0
    }
}

fn normalize(raw: Vec<Segment>) -> Vec<Segment> {
    let mut raw: Vec<Segment> = raw
        .into_iter()
        .map(|mut seg| {
            seg.start = sanitize_time(seg.start);
            seg.end = if seg.end.is_finite() {
                seg.end
            } else {
                seg.start
            };
            if seg.end < seg.start + MIN_SEGMENT_DURATION {
                seg.end = seg.start + MIN_SEGMENT_DURATION;
            }
            seg
        })
        .collect();
    raw.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut out: Vec<Segment> = Vec::with_capacity(raw.len());
    for mut seg in raw {
        if let Some(prev) = out.last_mut() {
            if seg.start < prev.end {
                if seg.start - prev.start >= MIN_SEGMENT_DURATION {
                    prev.end = seg.start;
                } else {
                    seg.start = prev.end;
                    seg.end = seg.end.max(seg.start + MIN_SEGMENT_DURATION);
                }
            }
        }
        out.push(seg);
    }
    out
}
