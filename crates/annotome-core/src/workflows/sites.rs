use crate::core::io::error::InterchangeError;
use crate::core::io::sites::SitesFile;
use crate::core::io::traits::{AnnotationFile, AnnotationTable};
use crate::core::models::proteome::Proteome;
use crate::core::models::site::SiteRecord;
use crate::engine::config::LoadPolicy;
use crate::engine::error::LoadError;
use crate::engine::loader::{self, LoadReport};
use std::path::Path;
use tracing::{info, instrument};

/// Reads a Sites file and attaches its sites to the matching proteins.
///
/// With `policy.skip_bad`, lines with malformed required fields are skipped
/// and reported, as are sites outside their protein.
///
/// # Errors
///
/// Returns [`LoadError::Interchange`] if the file cannot be read or has a
/// fatal parse error, and [`LoadError::Annotation`] if a site is rejected while
/// `policy.skip_bad` is off.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn add_sites_from_file<P: AsRef<Path>>(
    proteome: &mut Proteome,
    path: P,
    delimiter: u8,
    policy: &LoadPolicy,
) -> Result<LoadReport, LoadError> {
    loader::load_file::<SitesFile, _>(proteome, path, delimiter, policy)
}

/// Attaches already-parsed site records, keyed by protein unique ID.
pub fn add_sites_from_dictionary(
    proteome: &mut Proteome,
    table: &AnnotationTable<SiteRecord>,
    policy: &LoadPolicy,
) -> Result<LoadReport, LoadError> {
    loader::load(proteome, table, policy)
}

/// Writes every site in the proteome to a Sites file.
pub fn write_sites<P: AsRef<Path>>(
    proteome: &Proteome,
    path: P,
    delimiter: u8,
) -> Result<(), InterchangeError> {
    let path = path.as_ref();
    SitesFile::write_to_path(proteome, delimiter, path)?;
    info!(path = %path.display(), "Wrote sites");
    Ok(())
}
