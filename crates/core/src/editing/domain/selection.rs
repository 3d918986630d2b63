use crate::segments::domain::boundary::Boundary;

/// Which segment, and which of its boundaries, the user is working on.
///
/// A boundary is only ever set together with an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
    boundary: Option<Boundary>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn boundary(&self) -> Option<Boundary> {
        self.index.and(self.boundary)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.index == Some(index)
    }

    /// Row selection: picks a segment without arming a boundary.
    pub fn select_row(&mut self, index: usize) {
        self.index = Some(index);
        self.boundary = None;
    }

    pub fn select_boundary(&mut self, index: usize, boundary: Boundary) {
        self.index = Some(index);
        self.boundary = Some(boundary);
    }

    /// Flip start/end on the current segment. With a row selected but no
    /// boundary armed, arms the start. Returns the new boundary.
    pub fn toggle_boundary(&mut self) -> Option<Boundary> {
        self.index?;
        let next = self.boundary.map_or(Boundary::Start, Boundary::toggled);
        self.boundary = Some(next);
        Some(next)
    }

    pub fn clear(&mut self) {
        *self = Self::none();
    }

    /// Keep the selection pointing at the same segment after `removed` is
    /// deleted from the list.
    pub fn on_segment_removed(&mut self, removed: usize) {
        match self.index {
            Some(i) if i == removed => self.clear(),
            Some(i) if i > removed => self.index = Some(i - 1),
            _ => {}
        }
    }
}
