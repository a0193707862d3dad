use std::fmt;
use tracing::warn;

/// A recoverable problem encountered while reading or loading annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A line was dropped by a reader because a required field was malformed.
    SkippedLine {
        file: String,
        line: usize,
        reason: String,
    },
    /// A domain record could not be attached to its protein.
    SkippedDomain {
        unique_id: String,
        start: isize,
        end: isize,
        reason: String,
    },
    /// A site record could not be attached to its protein.
    SkippedSite {
        unique_id: String,
        position: isize,
        site_type: String,
        reason: String,
    },
    /// A protein was left out of a proteome built from a sequence file.
    DroppedProtein { unique_id: String, reason: String },
}

impl Diagnostic {
    /// The protein this diagnostic concerns, if any.
    pub fn unique_id(&self) -> Option<&str> {
        match self {
            Diagnostic::SkippedLine { .. } => None,
            Diagnostic::SkippedDomain { unique_id, .. }
            | Diagnostic::SkippedSite { unique_id, .. }
            | Diagnostic::DroppedProtein { unique_id, .. } => Some(unique_id),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedLine { file, line, reason } => {
                write!(f, "Skipping line {} of '{}': {}", line, file, reason)
            }
            Diagnostic::SkippedDomain {
                unique_id,
                start,
                end,
                reason,
            } => write!(
                f,
                "Skipping domain at {}-{} on {}: {}",
                start, end, unique_id, reason
            ),
            Diagnostic::SkippedSite {
                unique_id,
                position,
                site_type,
                reason,
            } => write!(
                f,
                "Skipping site {} at {} on {}: {}",
                site_type, position, unique_id, reason
            ),
            Diagnostic::DroppedProtein { unique_id, reason } => {
                write!(f, "Dropping protein {}: {}", unique_id, reason)
            }
        }
    }
}

/// Collects diagnostics in the order they occur.
///
/// Every pushed diagnostic is also emitted as a `tracing` warning, so callers can
/// either inspect the collection or rely on the installed subscriber.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Appends another collection without re-emitting its entries.
    pub fn append(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
