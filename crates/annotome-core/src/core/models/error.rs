use thiserror::Error;

/// Invariant violations raised when an annotation is attached to a protein.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    #[error(
        "Domain {start}-{end} falls outside protein '{unique_id}' (valid positions: 1-{length})"
    )]
    DomainOutOfBounds {
        unique_id: String,
        start: isize,
        end: isize,
        length: usize,
    },

    #[error("Domain on protein '{unique_id}' has start {start} after end {end}")]
    InvalidInterval {
        unique_id: String,
        start: isize,
        end: isize,
    },

    #[error(
        "Site at position {position} falls outside protein '{unique_id}' (valid positions: 1-{length})"
    )]
    SiteOutOfBounds {
        unique_id: String,
        position: isize,
        length: usize,
    },

    #[error("Domain '{name}' already exists on protein '{unique_id}'")]
    DuplicateName { unique_id: String, name: String },
}

impl AnnotationError {
    pub fn is_bounds_error(&self) -> bool {
        !matches!(self, AnnotationError::DuplicateName { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProteomeError {
    #[error("A protein with unique ID '{0}' is already present in the proteome")]
    DuplicateProtein(String),
}
