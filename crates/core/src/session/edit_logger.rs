use std::collections::HashMap;

use crate::segments::domain::edit_rejected::EditRejected;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditKind {
    Load,
    Text,
    Drag,
    Nudge,
    Retime,
    Split,
    Delete,
    Undo,
}

impl std::fmt::Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EditKind::Load => "load",
            EditKind::Text => "text",
            EditKind::Drag => "drag",
            EditKind::Nudge => "nudge",
            EditKind::Retime => "retime",
            EditKind::Split => "split",
            EditKind::Delete => "delete",
            EditKind::Undo => "undo",
        };
        f.pad(name)
    }
}

/// Cross-cutting observer for editing activity.
///
/// Keeps the session free of any particular output mechanism: the CLI logs
/// through the `log` crate, tests and embedders can stay silent.
pub trait EditLogger: Send {
    /// A committed edit of the given kind.
    fn edit(&mut self, kind: EditKind);

    /// A request that was turned down without changing state.
    fn rejected(&mut self, kind: EditKind, reason: &EditRejected);

    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards all events.
pub struct NullEditLogger;

impl EditLogger for NullEditLogger {
    fn edit(&mut self, _kind: EditKind) {}
    fn rejected(&mut self, _kind: EditKind, _reason: &EditRejected) {}
    fn info(&mut self, _message: &str) {}
}

/// Counts edits and rejections per kind and reports them through `log`.
#[derive(Debug, Default)]
pub struct CountingEditLogger {
    edits: HashMap<EditKind, usize>,
    rejections: HashMap<EditKind, usize>,
    messages: Vec<String>,
}

impl CountingEditLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edits_for(&self, kind: EditKind) -> usize {
        self.edits.get(&kind).copied().unwrap_or(0)
    }

    pub fn rejections_for(&self, kind: EditKind) -> usize {
        self.rejections.get(&kind).copied().unwrap_or(0)
    }

    /// Formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.edits.is_empty() && self.rejections.is_empty() {
            return None;
        }

        let total: usize = self.edits.values().sum();
        let mut lines = vec![format!("Edit summary ({total} edits):")];

        let mut kinds: Vec<_> = self.edits.keys().chain(self.rejections.keys()).collect();
        kinds.sort();
        kinds.dedup();
        for kind in kinds {
            let done = self.edits_for(*kind);
            let rejected = self.rejections_for(*kind);
            if rejected > 0 {
                lines.push(format!("  {kind:8}: {done:4}  ({rejected} rejected)"));
            } else {
                lines.push(format!("  {kind:8}: {done:4}"));
            }
        }

        Some(lines.join("\n"))
    }
}

impl EditLogger for CountingEditLogger {
    fn edit(&mut self, kind: EditKind) {
        *self.edits.entry(kind).or_default() += 1;
    }

    fn rejected(&mut self, kind: EditKind, reason: &EditRejected) {
        *self.rejections.entry(kind).or_default() += 1;
        log::warn!("Rejected {kind}: {reason}");
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
