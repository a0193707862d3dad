use super::config::LoadPolicy;
use super::error::LoadError;
use super::outcome::RecordOutcome;
use crate::core::diagnostics::{Diagnostic, Diagnostics};
use crate::core::io::traits::{AnnotationFile, AnnotationTable, ReadOptions};
use crate::core::models::domain::DomainRecord;
use crate::core::models::ids::ProteinId;
use crate::core::models::protein::Protein;
use crate::core::models::proteome::Proteome;
use crate::core::models::site::SiteRecord;
use std::path::Path;
use tracing::{debug, info, instrument};

/// A parsed record that knows how to attach itself to a protein.
pub trait LoadableRecord {
    fn attach(&self, protein: &mut Protein, policy: &LoadPolicy) -> RecordOutcome;

    /// Describes this record as skipped from `unique_id` for `reason`.
    fn skipped(&self, unique_id: &str, reason: String) -> Diagnostic;
}

impl LoadableRecord for DomainRecord {
    fn attach(&self, protein: &mut Protein, policy: &LoadPolicy) -> RecordOutcome {
        protein
            .add_domain(self.clone(), policy.insert_options())
            .into()
    }

    fn skipped(&self, unique_id: &str, reason: String) -> Diagnostic {
        Diagnostic::SkippedDomain {
            unique_id: unique_id.to_string(),
            start: self.start,
            end: self.end,
            reason,
        }
    }
}

impl LoadableRecord for SiteRecord {
    fn attach(&self, protein: &mut Protein, _policy: &LoadPolicy) -> RecordOutcome {
        match protein.add_site(self.clone()) {
            Ok(_) => RecordOutcome::Added,
            Err(error) => RecordOutcome::Failed(error),
        }
    }

    fn skipped(&self, unique_id: &str, reason: String) -> Diagnostic {
        Diagnostic::SkippedSite {
            unique_id: unique_id.to_string(),
            position: self.position,
            site_type: self.site_type.clone(),
            reason,
        }
    }
}

/// Summary of a completed load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub added: usize,
    pub skipped: usize,
    /// Lines skipped by the reader, then records skipped by the loader.
    pub diagnostics: Diagnostics,
}

/// Attaches every record in `table` to the protein with the matching unique ID.
///
/// Proteins are visited in proteome order and each protein's records in table
/// order. Records for unique IDs absent from the proteome are ignored.
///
/// # Errors
///
/// Returns [`LoadError::Annotation`] for the first record that violates an
/// annotation invariant when `policy.skip_bad` is off. Records attached before
/// the failure remain attached.
#[instrument(skip_all, name = "bulk_load", fields(proteins = table.len()))]
pub fn load<R: LoadableRecord>(
    proteome: &mut Proteome,
    table: &AnnotationTable<R>,
    policy: &LoadPolicy,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    let ids: Vec<ProteinId> = proteome.ids().collect();
    for id in ids {
        let Some(protein) = proteome.protein_mut(id) else {
            continue;
        };
        let Some(records) = table.get(protein.unique_id()) else {
            continue;
        };

        for record in records {
            let reason = match record.attach(protein, policy) {
                RecordOutcome::Added => {
                    report.added += 1;
                    continue;
                }
                RecordOutcome::Skipped(reason) => reason.to_string(),
                RecordOutcome::Failed(error) if policy.skip_bad => error.to_string(),
                RecordOutcome::Failed(source) => {
                    return Err(LoadError::Annotation {
                        unique_id: protein.unique_id().to_string(),
                        source,
                    });
                }
            };
            report.skipped += 1;
            if policy.verbose {
                report
                    .diagnostics
                    .push(record.skipped(protein.unique_id(), reason));
            }
        }
    }

    let unknown = table
        .keys()
        .filter(|unique_id| !proteome.contains(unique_id))
        .count();
    if unknown > 0 {
        debug!(unknown, "Ignored records for proteins not in the proteome");
    }
    info!(
        added = report.added,
        skipped = report.skipped,
        "Finished loading annotations"
    );
    Ok(report)
}

/// Reads an annotation file of format `F` and loads it into `proteome`.
///
/// The reader skips malformed lines when `policy.skip_bad` is set and the
/// format allows it. Its diagnostics are reported ahead of the loader's.
pub fn load_file<F, P>(
    proteome: &mut Proteome,
    path: P,
    delimiter: u8,
    policy: &LoadPolicy,
) -> Result<LoadReport, LoadError>
where
    F: AnnotationFile,
    F::Record: LoadableRecord,
    P: AsRef<Path>,
{
    let options = ReadOptions {
        delimiter,
        skip_bad: policy.skip_bad,
    };
    let (table, mut diagnostics) = F::read_from_path(path, &options)?;
    let report = load(proteome, &table, policy)?;
    diagnostics.append(report.diagnostics);
    Ok(LoadReport {
        diagnostics,
        ..report
    })
}
