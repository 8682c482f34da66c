//! Diagnostic sink and once-per-id warning deduplication
//!
//! Loading and rendering report three severities: info for load milestones,
//! warnings for recoverable issues and errors for fatal ones. A
//! [`Diagnostics`] value is created per load (or per renderer) and owns the
//! set of ids that have already been warned about, so a dangling reference
//! reached many times is only reported once. A loaded scene keeps the load
//! pass's [`WarnedIds`] so later passes over the same scene stay silent about
//! ids already reported.

use std::collections::HashSet;
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Load milestones
    Info,
    /// Minor, recoverable issues
    Warning,
    /// Fatal issues; the load is aborted
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Category used to scope once-per-id warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// Reference to a component id
    Component,
    /// Reference to a primitive id
    Primitive,
    /// Reference to a material id
    Material,
    /// Reference to a texture id
    Texture,
    /// Reference to an animation id
    Animation,
    /// A component reached again on its own ancestor path
    Cycle,
    /// An inheritance sentinel found where no ancestor exists
    RootInherit,
}

/// A single emitted diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Human readable message
    pub message: String,
}

/// Destination of diagnostics
pub trait DiagnosticSink {
    /// Receive one diagnostic
    fn emit(&mut self, severity: Severity, message: &str);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => log::info!("   {}", message),
            Severity::Warning => log::warn!("Warning: {}", message),
            Severity::Error => log::error!("Scene loading error: {}", message),
        }
    }
}

/// Set of `(kind, id)` pairs that have already been warned about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarnedIds(HashSet<(RefKind, String)>);

impl WarnedIds {
    /// Record a pair; returns `false` if it was already present
    pub fn insert(&mut self, kind: RefKind, id: &str) -> bool {
        if self.contains(kind, id) {
            return false;
        }
        self.0.insert((kind, id.to_string()))
    }

    /// Whether the pair has been recorded
    pub fn contains(&self, kind: RefKind, id: &str) -> bool {
        self.0.contains(&(kind, id.to_string()))
    }

    /// Add every pair of `other`
    pub fn extend(&mut self, other: &Self) {
        for (kind, id) in &other.0 {
            self.insert(*kind, id);
        }
    }

    /// Number of recorded pairs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Diagnostic front-end: sink, history and warned-id set
pub struct Diagnostics {
    sink: Box<dyn DiagnosticSink>,
    history: Vec<Diagnostic>,
    warned: WarnedIds,
}

impl Diagnostics {
    /// Create diagnostics forwarding to the given sink
    pub fn new(sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            history: Vec::new(),
            warned: WarnedIds::default(),
        }
    }

    /// Create diagnostics forwarding to `log`
    pub fn to_log() -> Self {
        Self::new(Box::new(LogSink))
    }

    /// Report a load milestone
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message.into());
    }

    /// Report a minor issue
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    /// Report a fatal issue
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    /// Report a minor issue at most once per `(kind, id)` pair
    ///
    /// The message is only built when the pair has not been seen yet.
    /// Returns whether a warning was emitted.
    pub fn warn_once<F>(&mut self, kind: RefKind, id: &str, message: F) -> bool
    where
        F: FnOnce() -> String,
    {
        if self.warned.insert(kind, id) {
            self.push(Severity::Warning, message());
            true
        } else {
            false
        }
    }

    /// Pairs warned about so far
    pub const fn warned(&self) -> &WarnedIds {
        &self.warned
    }

    /// Treat every pair of `reported` as already warned about
    pub fn absorb(&mut self, reported: &WarnedIds) {
        self.warned.extend(reported);
    }

    /// All diagnostics emitted so far
    pub fn history(&self) -> &[Diagnostic] {
        &self.history
    }

    /// Warnings emitted so far
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.history.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Number of warnings whose message contains `needle`
    pub fn count_warnings_containing(&self, needle: &str) -> usize {
        self.warnings().filter(|d| d.message.contains(needle)).count()
    }

    fn push(&mut self, severity: Severity, message: String) {
        self.sink.emit(severity, &message);
        self.history.push(Diagnostic { severity, message });
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::to_log()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("history", &self.history)
            .field("warned", &self.warned.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedSink(Rc<RefCell<Vec<(Severity, String)>>>);

    impl DiagnosticSink for SharedSink {
        fn emit(&mut self, severity: Severity, message: &str) {
            self.0.borrow_mut().push((severity, message.to_string()));
        }
    }

    #[test]
    fn test_warn_once_deduplicates_per_kind_and_id() {
        let mut diagnostics = Diagnostics::default();

        assert!(diagnostics.warn_once(RefKind::Primitive, "p1", || "missing p1".into()));
        assert!(!diagnostics.warn_once(RefKind::Primitive, "p1", || "missing p1".into()));
        // Same id, different kind is a different offence
        assert!(diagnostics.warn_once(RefKind::Component, "p1", || "missing component p1".into()));

        assert_eq!(diagnostics.warnings().count(), 2);
        assert!(diagnostics.warned().contains(RefKind::Primitive, "p1"));
        assert!(!diagnostics.warned().contains(RefKind::Material, "p1"));
    }

    #[test]
    fn test_absorbed_ids_stay_silent() {
        let mut load = Diagnostics::default();
        load.warn_once(RefKind::Primitive, "gone", || "primitive 'gone' is not defined".into());

        let mut later = Diagnostics::default();
        later.absorb(load.warned());
        assert!(!later.warn_once(RefKind::Primitive, "gone", || "again".into()));
        assert!(later.warn_once(RefKind::Component, "gone", || "other kind".into()));
        assert_eq!(later.warnings().count(), 1);
        assert_eq!(later.warned().len(), 2);
    }

    #[test]
    fn test_sink_receives_every_severity() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut diagnostics = Diagnostics::new(Box::new(SharedSink(Rc::clone(&seen))));

        diagnostics.info("Parsed scene");
        diagnostics.warning("tag <views> out of order");
        diagnostics.error("tag <lights> missing");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, Severity::Info);
        assert_eq!(seen[1].0, Severity::Warning);
        assert_eq!(seen[2], (Severity::Error, "tag <lights> missing".to_string()));
        assert_eq!(diagnostics.history().len(), 3);
    }
}
