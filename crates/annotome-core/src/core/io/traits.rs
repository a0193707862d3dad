use super::attributes::{KEY_VALUE_SEPARATOR, LineContext, check_delimiter, parse_key_value_pairs};
use super::error::{InterchangeError, ParseErrorKind};
use crate::core::diagnostics::{Diagnostic, Diagnostics};
use crate::core::models::attributes::Attributes;
use crate::core::models::protein::Protein;
use crate::core::models::proteome::Proteome;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Records parsed from an interchange file, grouped by protein unique ID.
///
/// Within a group, records keep the order in which they appeared in the file.
pub type AnnotationTable<R> = HashMap<String, Vec<R>>;

pub const DEFAULT_DELIMITER: u8 = b'\t';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Single-byte field delimiter. Must not be `:`.
    pub delimiter: u8,
    /// Skip lines whose required fields are malformed instead of failing,
    /// for formats that allow it.
    pub skip_bad: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            skip_bad: true,
        }
    }
}

impl ReadOptions {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

/// Defines a delimited annotation format: a fixed list of required fields
/// followed by any number of `key:value` attribute tokens.
///
/// Implementors provide the per-line field handling; reading, grouping and
/// writing are shared.
pub trait AnnotationFile {
    /// The intermediate record produced for each line.
    type Record;

    /// Names of the required leading fields, in file order.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Whether [`ReadOptions::skip_bad`] may drop lines with malformed required fields.
    const TOLERATES_BAD_LINES: bool;

    /// Parses the required fields of one line into its unique ID and record.
    ///
    /// `fields` holds every trimmed field of the line, attributes included.
    fn parse_required(fields: &[&str]) -> Result<(String, Self::Record), ParseErrorKind>;

    fn attributes_mut(record: &mut Self::Record) -> &mut Attributes;

    /// Writes one line per annotation of `protein`, in insertion order.
    fn write_protein<W: Write>(
        protein: &Protein,
        delimiter: u8,
        writer: &mut csv::Writer<W>,
    ) -> Result<(), InterchangeError>;

    /// Parses the full contents of a file.
    ///
    /// # Arguments
    ///
    /// * `content` - The file contents.
    /// * `source` - Name used to identify the file in errors and diagnostics.
    /// * `options` - Delimiter and bad-line tolerance.
    ///
    /// # Return
    ///
    /// Returns the grouped records and diagnostics for any skipped lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiter is `:`, if an attribute token is
    /// malformed, or if a required field is malformed and the line may not be
    /// skipped.
    fn read_from_str(
        content: &str,
        source: &str,
        options: &ReadOptions,
    ) -> Result<(AnnotationTable<Self::Record>, Diagnostics), InterchangeError> {
        check_delimiter(options.delimiter)?;

        let delimiter = char::from(options.delimiter);
        let required = Self::REQUIRED_FIELDS.len();
        let mut table: AnnotationTable<Self::Record> = HashMap::new();
        let mut diagnostics = Diagnostics::new();

        for (index, line) in content.lines().enumerate() {
            let context = LineContext {
                file: source,
                line: index + 1,
            };
            let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }

            let (unique_id, mut record) = match Self::parse_required(&fields) {
                Ok(parsed) => parsed,
                Err(kind) if options.skip_bad && Self::TOLERATES_BAD_LINES => {
                    diagnostics.push(Diagnostic::SkippedLine {
                        file: source.to_string(),
                        line: context.line,
                        reason: kind.to_string(),
                    });
                    continue;
                }
                Err(kind) => return Err(context.error(kind).into()),
            };

            if fields.len() > required {
                *Self::attributes_mut(&mut record) = parse_key_value_pairs(
                    fields[required..].iter().copied(),
                    options.delimiter,
                    &context,
                )?;
            }

            table.entry(unique_id).or_default().push(record);
        }

        Ok((table, diagnostics))
    }

    /// Reads everything from `reader` before parsing.
    fn read_from(
        reader: &mut impl Read,
        source: &str,
        options: &ReadOptions,
    ) -> Result<(AnnotationTable<Self::Record>, Diagnostics), InterchangeError> {
        check_delimiter(options.delimiter)?;
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::read_from_str(&content, source, options)
    }

    /// Reads a file from a path. The delimiter is validated before the file is opened.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        options: &ReadOptions,
    ) -> Result<(AnnotationTable<Self::Record>, Diagnostics), InterchangeError> {
        check_delimiter(options.delimiter)?;
        let path = path.as_ref();
        let source = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| InterchangeError::File {
            path: source.clone(),
            source: e,
        })?;
        Self::read_from_str(&content, &source, options)
    }

    /// Writes every annotation of every protein, proteins in proteome order.
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiter is `:`, if a value cannot be written
    /// without breaking the format, or on I/O failure.
    fn write_to(
        proteome: &Proteome,
        delimiter: u8,
        writer: &mut impl Write,
    ) -> Result<(), InterchangeError> {
        check_delimiter(delimiter)?;
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .flexible(true)
            .from_writer(writer);
        for protein in proteome.proteins() {
            Self::write_protein(protein, delimiter, &mut csv_writer)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes to a file at `path`. Every row is rendered before the file is
    /// created, so a refused value leaves any existing file untouched.
    fn write_to_path<P: AsRef<Path>>(
        proteome: &Proteome,
        delimiter: u8,
        path: P,
    ) -> Result<(), InterchangeError> {
        let mut rendered = Vec::new();
        Self::write_to(proteome, delimiter, &mut rendered)?;

        let path = path.as_ref();
        let file_error = |e| InterchangeError::File {
            path: path.to_string_lossy().to_string(),
            source: e,
        };
        let file = File::create(path).map_err(file_error)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&rendered).map_err(file_error)?;
        writer.flush().map_err(file_error)?;
        Ok(())
    }
}

pub(crate) fn field<'a>(
    fields: &[&'a str],
    index: usize,
    name: &'static str,
) -> Result<&'a str, ParseErrorKind> {
    fields
        .get(index)
        .copied()
        .ok_or(ParseErrorKind::MissingField { field: name })
}

pub(crate) fn text_field<'a>(
    fields: &[&'a str],
    index: usize,
    name: &'static str,
) -> Result<&'a str, ParseErrorKind> {
    let value = field(fields, index, name)?;
    if value.is_empty() {
        return Err(ParseErrorKind::EmptyField { field: name });
    }
    Ok(value)
}

pub(crate) fn int_field(
    fields: &[&str],
    index: usize,
    name: &'static str,
) -> Result<isize, ParseErrorKind> {
    let value = field(fields, index, name)?;
    value.parse().map_err(|_| ParseErrorKind::InvalidInt {
        field: name,
        value: value.to_string(),
    })
}

pub(crate) fn float_field(
    fields: &[&str],
    index: usize,
    name: &'static str,
) -> Result<f64, ParseErrorKind> {
    let value = field(fields, index, name)?;
    value.parse().map_err(|_| ParseErrorKind::InvalidFloat {
        field: name,
        value: value.to_string(),
    })
}

/// Checks that a text value reads back exactly as written. Readers trim every
/// field, so surrounding whitespace is refused along with line breaks and the
/// delimiter.
pub(crate) fn writable<'a>(
    value: &'a str,
    unique_id: &str,
    field: &'static str,
    delimiter: u8,
) -> Result<&'a str, InterchangeError> {
    let reason = if value.contains(['\n', '\r']) {
        Some("it contains a line break")
    } else if value.as_bytes().contains(&delimiter) {
        Some("it contains the field delimiter")
    } else if value.trim() != value {
        Some("it has leading or trailing whitespace")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(InterchangeError::Unwritable {
            unique_id: unique_id.to_string(),
            field,
            value: value.to_string(),
            reason,
        }),
        None => Ok(value),
    }
}

/// Like [`writable`], for required text fields that a reader rejects when empty.
pub(crate) fn writable_required<'a>(
    value: &'a str,
    unique_id: &str,
    field: &'static str,
    delimiter: u8,
) -> Result<&'a str, InterchangeError> {
    if value.trim().is_empty() {
        return Err(InterchangeError::Unwritable {
            unique_id: unique_id.to_string(),
            field,
            value: value.to_string(),
            reason: "it is empty",
        });
    }
    writable(value, unique_id, field, delimiter)
}

/// Renders attributes as `key:value` tokens, sorted by key.
pub(crate) fn attribute_tokens(
    attributes: &Attributes,
    unique_id: &str,
    delimiter: u8,
) -> Result<Vec<String>, InterchangeError> {
    attributes
        .iter()
        .map(|(key, value)| {
            let value = value.to_string();
            if key.trim().is_empty() {
                return Err(InterchangeError::Unwritable {
                    unique_id: unique_id.to_string(),
                    field: "attribute key",
                    value: key.clone(),
                    reason: "it is empty",
                });
            }
            for (field, text) in [("attribute key", key.as_str()), ("attribute value", value.as_str())] {
                if text.contains(KEY_VALUE_SEPARATOR) {
                    return Err(InterchangeError::Unwritable {
                        unique_id: unique_id.to_string(),
                        field,
                        value: text.to_string(),
                        reason: "it contains ':'",
                    });
                }
                writable(text, unique_id, field, delimiter)?;
            }
            Ok(format!("{}{}{}", key, KEY_VALUE_SEPARATOR, value))
        })
        .collect()
}
