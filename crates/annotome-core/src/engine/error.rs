use crate::core::io::error::InterchangeError;
use crate::core::models::error::AnnotationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Interchange(#[from] InterchangeError),

    #[error("Failed to annotate protein '{unique_id}': {source}")]
    Annotation {
        unique_id: String,
        #[source]
        source: AnnotationError,
    },
}
