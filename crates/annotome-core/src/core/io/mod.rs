//! Reading and writing annotation files.
//!
//! The delimited Domains and Sites formats share one line grammar: a fixed set
//! of required fields followed by optional `key:value` attribute tokens. Both
//! are implemented through the [`traits::AnnotationFile`] trait. Proteomes are
//! built from FASTA files by [`fasta`].

pub mod attributes;
pub mod domains;
pub mod error;
pub mod fasta;
pub mod sites;
pub mod traits;
