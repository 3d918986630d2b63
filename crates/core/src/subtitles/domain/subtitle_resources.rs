/// Subtitle resources the host can offer for a media file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleResources {
    pub names: Vec<String>,
    pub selected: Option<String>,
}

impl SubtitleResources {
    pub fn new(names: Vec<String>, selected: Option<String>) -> Self {
        Self { names, selected }
    }

    /// The resource to open: the explicit selection if it is on offer,
    /// otherwise the first one.
    pub fn resolve(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .filter(|s| self.names.iter().any(|n| n == s))
            .or_else(|| self.names.first().map(String::as_str))
    }
}
