use super::error::{InterchangeError, ParseErrorKind};
use super::traits::{
    AnnotationFile, attribute_tokens, field, float_field, int_field, text_field, writable,
    writable_required,
};
use crate::core::models::attributes::Attributes;
use crate::core::models::protein::Protein;
use crate::core::models::site::SiteRecord;
use std::io::Write;

/// The Sites interchange format, one site per line:
///
/// ```text
/// unique_ID <d> position <d> site_type <d> symbol <d> value [<d> key:value ...]
/// ```
///
/// With [`ReadOptions::skip_bad`](super::traits::ReadOptions::skip_bad), lines
/// with malformed required fields are dropped and reported instead of failing
/// the read. Malformed attributes always fail.
pub struct SitesFile;

impl AnnotationFile for SitesFile {
    type Record = SiteRecord;

    const REQUIRED_FIELDS: &'static [&'static str] =
        &["unique_ID", "position", "site_type", "symbol", "value"];
    const TOLERATES_BAD_LINES: bool = true;

    fn parse_required(fields: &[&str]) -> Result<(String, SiteRecord), ParseErrorKind> {
        let unique_id = text_field(fields, 0, "unique_ID")?;
        let position = int_field(fields, 1, "position")?;
        let site_type = text_field(fields, 2, "site_type")?;
        let symbol = field(fields, 3, "symbol")?;
        let value = float_field(fields, 4, "value")?;
        Ok((
            unique_id.to_string(),
            SiteRecord::new(position, site_type, symbol, value),
        ))
    }

    fn attributes_mut(record: &mut SiteRecord) -> &mut Attributes {
        &mut record.attributes
    }

    fn write_protein<W: Write>(
        protein: &Protein,
        delimiter: u8,
        writer: &mut csv::Writer<W>,
    ) -> Result<(), InterchangeError> {
        let unique_id = protein.unique_id();
        for site in protein.sites() {
            let mut row = vec![
                writable_required(unique_id, unique_id, "unique_ID", delimiter)?.to_string(),
                site.position.to_string(),
                writable_required(&site.site_type, unique_id, "site_type", delimiter)?.to_string(),
                writable(&site.symbol, unique_id, "symbol", delimiter)?.to_string(),
                site.value.to_string(),
            ];
            row.extend(attribute_tokens(&site.attributes, unique_id, delimiter)?);
            writer.write_record(&row)?;
        }
        Ok(())
    }
}
