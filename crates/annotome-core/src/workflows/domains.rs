use crate::core::io::domains::DomainsFile;
use crate::core::io::error::InterchangeError;
use crate::core::io::traits::{AnnotationFile, AnnotationTable};
use crate::core::models::domain::DomainRecord;
use crate::core::models::proteome::Proteome;
use crate::engine::config::LoadPolicy;
use crate::engine::error::LoadError;
use crate::engine::loader::{self, LoadReport};
use std::path::Path;
use tracing::{info, instrument};

/// Reads a Domains file and attaches its domains to the matching proteins.
///
/// Malformed lines always fail the read, whatever `policy.skip_bad` says.
///
/// # Errors
///
/// Returns [`LoadError::Interchange`] if the file cannot be read or parsed, and
/// [`LoadError::Annotation`] if a domain is rejected while `policy.skip_bad` is off.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn add_domains_from_file<P: AsRef<Path>>(
    proteome: &mut Proteome,
    path: P,
    delimiter: u8,
    policy: &LoadPolicy,
) -> Result<LoadReport, LoadError> {
    loader::load_file::<DomainsFile, _>(proteome, path, delimiter, policy)
}

/// Attaches already-parsed domain records, keyed by protein unique ID.
pub fn add_domains_from_dictionary(
    proteome: &mut Proteome,
    table: &AnnotationTable<DomainRecord>,
    policy: &LoadPolicy,
) -> Result<LoadReport, LoadError> {
    loader::load(proteome, table, policy)
}

/// Writes every domain in the proteome to a Domains file.
pub fn write_domains<P: AsRef<Path>>(
    proteome: &Proteome,
    path: P,
    delimiter: u8,
) -> Result<(), InterchangeError> {
    let path = path.as_ref();
    DomainsFile::write_to_path(proteome, delimiter, path)?;
    info!(path = %path.display(), "Wrote domains");
    Ok(())
}
