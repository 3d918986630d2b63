/// One caption entry on the timeline. Times are in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Closed-interval containment: both endpoints count as inside.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}
