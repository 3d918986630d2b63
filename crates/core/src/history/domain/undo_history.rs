use std::collections::VecDeque;

use crate::segments::domain::segment::Segment;
use crate::shared::constants::UNDO_LIMIT;

/// Bounded stack of full segment-list snapshots.
///
/// Snapshots are pushed *before* an edit mutates the store, so the top entry
/// is always the state preceding the latest committed edit. The bottom entry
/// is the freshly loaded state and is never popped, which makes undo stop at
/// the loaded file.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    snapshots: VecDeque<Vec<Segment>>,
    limit: usize,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::with_limit(UNDO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Drop every snapshot and start over from `seed`.
    pub fn reset(&mut self, seed: &[Segment]) {
        self.snapshots.clear();
        self.snapshots.push_back(seed.to_vec());
    }

    pub fn push(&mut self, snapshot: &[Segment]) {
        if self.snapshots.len() == self.limit {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot.to_vec());
    }

    /// Most recent snapshot that differs from `current`, or `None` when
    /// nothing older than `current` is recorded.
    ///
    /// Snapshots identical to `current` (edits that ended up changing
    /// nothing, e.g. a drag released where it started) are discarded on the
    /// way down.
    pub fn undo(&mut self, current: &[Segment]) -> Option<Vec<Segment>> {
        while self.snapshots.len() > 1
            && self.snapshots.back().is_some_and(|top| top == current)
        {
            self.snapshots.pop_back();
        }

        match self.snapshots.len() {
            0 => None,
            1 => {
                let base = &self.snapshots[0];
                (base != current).then(|| base.clone())
            }
            _ => self.snapshots.pop_back(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(texts: &[&str]) -> Vec<Segment> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Segment::new(i as f64, i as f64 + 1.0, *t))
            .collect()
    }

    #[test]
    fn test_undo_on_fresh_history_is_none() {
        let mut h = UndoHistory::new();
        assert!(h.undo(&list(&["a"])).is_none());
    }

    #[test]
    fn test_undo_right_after_reset_is_none() {
        let mut h = UndoHistory::new();
        let loaded = list(&["a"]);
        h.reset(&loaded);
        assert!(h.undo(&loaded).is_none());
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_undo_restores_pre_edit_state() {
        let mut h = UndoHistory::new();
        let loaded = list(&["a"]);
        h.reset(&loaded);

        h.push(&loaded);
        let edited = list(&["b"]);

        assert_eq!(h.undo(&edited), Some(loaded.clone()));
        assert!(h.undo(&loaded).is_none());
    }

    #[test]
    fn test_undo_walks_back_through_edits() {
        let mut h = UndoHistory::new();
        let s0 = list(&["a"]);
        let s1 = list(&["b"]);
        let s2 = list(&["c"]);
        h.reset(&s0);
        h.push(&s0);
        h.push(&s1);

        assert_eq!(h.undo(&s2), Some(s1.clone()));
        assert_eq!(h.undo(&s1), Some(s0.clone()));
        assert!(h.undo(&s0).is_none());
    }

    #[test]
    fn test_undo_skips_no_op_snapshots() {
        let mut h = UndoHistory::new();
        let s0 = list(&["a"]);
        let s1 = list(&["b"]);
        h.reset(&s0);
        h.push(&s0);
        h.push(&s1);
        h.push(&s1);

        assert_eq!(h.undo(&s1), Some(s0));
    }

    #[test]
    fn test_push_respects_limit() {
        let mut h = UndoHistory::with_limit(3);
        for i in 0..10 {
            h.push(&list(&[&i.to_string()]));
            assert!(h.len() <= 3);
        }
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_overflow_discards_oldest() {
        let mut h = UndoHistory::with_limit(2);
        h.push(&list(&["1"]));
        h.push(&list(&["2"]));
        h.push(&list(&["3"]));

        assert_eq!(h.undo(&list(&["4"])), Some(list(&["3"])));
        // "2" is now the base entry and is handed out without being popped.
        assert_eq!(h.undo(&list(&["3"])), Some(list(&["2"])));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(UndoHistory::default().limit(), UNDO_LIMIT);
    }
}
