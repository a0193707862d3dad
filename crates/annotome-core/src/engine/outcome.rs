use crate::core::models::error::AnnotationError;
use crate::core::models::protein::{Insertion, SkipReason};

/// What happened to a single record during a bulk load.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Added,
    /// Declined without error, e.g. a duplicate domain name outside safe mode.
    Skipped(SkipReason),
    /// Rejected by the protein; whether this aborts the load depends on the policy.
    Failed(AnnotationError),
}

impl RecordOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, RecordOutcome::Added)
    }
}

impl<K> From<Result<Insertion<K>, AnnotationError>> for RecordOutcome {
    fn from(result: Result<Insertion<K>, AnnotationError>) -> Self {
        match result {
            Ok(Insertion::Inserted(_)) => RecordOutcome::Added,
            Ok(Insertion::Skipped(reason)) => RecordOutcome::Skipped(reason),
            Err(error) => RecordOutcome::Failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_insertion_results() {
        let added: RecordOutcome = Ok::<_, AnnotationError>(Insertion::Inserted(7u32)).into();
        assert!(added.is_added());

        let reason = SkipReason::DuplicateName("IDR_1_5".into());
        let skipped: RecordOutcome = Ok::<Insertion<u32>, _>(Insertion::Skipped(reason.clone())).into();
        assert_eq!(skipped, RecordOutcome::Skipped(reason));

        let error = AnnotationError::SiteOutOfBounds {
            unique_id: "P1".into(),
            position: 0,
            length: 4,
        };
        let failed: RecordOutcome = Err::<Insertion<u32>, _>(error.clone()).into();
        assert_eq!(failed, RecordOutcome::Failed(error));
    }
}
