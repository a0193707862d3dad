use super::error::{ParseError, ParseErrorKind};
use crate::core::models::attributes::{AttributeValue, Attributes};

/// Separates an attribute key from its value. Never valid as a field delimiter.
pub const KEY_VALUE_SEPARATOR: char = ':';

/// Identifies the line currently being parsed, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub file: &'a str,
    pub line: usize,
}

impl LineContext<'_> {
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::Line {
            file: self.file.to_string(),
            line: self.line,
            kind,
        }
    }
}

/// Rejects field delimiters that clash with attribute tokens or line structure.
pub fn check_delimiter(delimiter: u8) -> Result<(), ParseError> {
    if delimiter == KEY_VALUE_SEPARATOR as u8 {
        return Err(ParseError::ReservedDelimiter);
    }
    if !delimiter.is_ascii() || delimiter == b'\n' || delimiter == b'\r' {
        return Err(ParseError::InvalidDelimiter(delimiter));
    }
    Ok(())
}

/// Parses the optional `key:value` tokens that follow a line's required fields.
///
/// Keys and values are trimmed and stored as text; whitespace-only tokens are
/// ignored. A repeated key keeps the last value seen.
///
/// # Errors
///
/// Returns [`ParseError::ReservedDelimiter`] if `delimiter` is `:`, and
/// [`ParseError::Line`] if a token does not contain exactly one `:` or has an
/// empty key.
pub fn parse_key_value_pairs<'t>(
    tokens: impl IntoIterator<Item = &'t str>,
    delimiter: u8,
    context: &LineContext<'_>,
) -> Result<Attributes, ParseError> {
    check_delimiter(delimiter)?;

    let mut attributes = Attributes::new();
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let mut parts = token.split(KEY_VALUE_SEPARATOR);
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key.trim(), value.trim()),
            _ => {
                return Err(context.error(ParseErrorKind::MalformedAttribute {
                    token: token.to_string(),
                }));
            }
        };
        if key.is_empty() {
            return Err(context.error(ParseErrorKind::EmptyAttributeKey {
                token: token.to_string(),
            }));
        }
        attributes.insert(key.to_string(), AttributeValue::Text(value.to_string()));
    }
    Ok(attributes)
}
