use super::error::{InterchangeError, ParseErrorKind};
use super::traits::{
    AnnotationFile, attribute_tokens, int_field, text_field, writable_required,
};
use crate::core::models::attributes::Attributes;
use crate::core::models::domain::DomainRecord;
use crate::core::models::protein::Protein;
use std::io::Write;

/// The Domains interchange format, one domain per line:
///
/// ```text
/// unique_ID <d> start <d> end <d> domain_type [<d> key:value ...]
/// ```
///
/// Malformed required fields always fail the whole read.
pub struct DomainsFile;

impl AnnotationFile for DomainsFile {
    type Record = DomainRecord;

    const REQUIRED_FIELDS: &'static [&'static str] = &["unique_ID", "start", "end", "domain_type"];
    const TOLERATES_BAD_LINES: bool = false;

    fn parse_required(fields: &[&str]) -> Result<(String, DomainRecord), ParseErrorKind> {
        let unique_id = text_field(fields, 0, "unique_ID")?;
        let start = int_field(fields, 1, "start")?;
        let end = int_field(fields, 2, "end")?;
        let domain_type = text_field(fields, 3, "domain_type")?;
        Ok((
            unique_id.to_string(),
            DomainRecord::new(start, end, domain_type),
        ))
    }

    fn attributes_mut(record: &mut DomainRecord) -> &mut Attributes {
        &mut record.attributes
    }

    fn write_protein<W: Write>(
        protein: &Protein,
        delimiter: u8,
        writer: &mut csv::Writer<W>,
    ) -> Result<(), InterchangeError> {
        let unique_id = protein.unique_id();
        for domain in protein.domains() {
            let mut row = vec![
                writable_required(unique_id, unique_id, "unique_ID", delimiter)?.to_string(),
                domain.start.to_string(),
                domain.end.to_string(),
                writable_required(&domain.domain_type, unique_id, "domain_type", delimiter)?
                    .to_string(),
            ];
            row.extend(attribute_tokens(&domain.attributes, unique_id, delimiter)?);
            writer.write_record(&row)?;
        }
        Ok(())
    }
}
