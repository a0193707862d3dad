use std::collections::BTreeMap;
use std::fmt;

/// Open-ended metadata attached to a domain or site, ordered by key.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single attribute value.
///
/// Values read from interchange files are always [`AttributeValue::Text`]; the
/// other variants exist for values set programmatically. Serialization back to
/// text goes through [`fmt::Display`] and does not preserve the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets the value as a number, parsing text on demand.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(s) => s.trim().parse().ok(),
            AttributeValue::Flag(_) => None,
        }
    }

    /// Interprets the value as a boolean; text accepts `true`/`false` in any case.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            AttributeValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            AttributeValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_values_are_interpreted_on_demand() {
        let value = AttributeValue::from(" 0.25 ");
        assert_eq!(value.as_str(), Some(" 0.25 "));
        assert_eq!(value.as_f64(), Some(0.25));
        assert_eq!(value.as_bool(), None);

        let flag = AttributeValue::from("TRUE");
        assert_eq!(flag.as_bool(), Some(true));
    }

    #[test]
    fn typed_values_render_as_plain_text() {
        assert_eq!(AttributeValue::from(1.5).to_string(), "1.5");
        assert_eq!(AttributeValue::from(false).to_string(), "false");
        assert_eq!(AttributeValue::from("IDR").to_string(), "IDR");
    }

    #[test]
    fn typed_values_do_not_expose_text() {
        assert_eq!(AttributeValue::Number(3.0).as_str(), None);
        assert_eq!(AttributeValue::Flag(true).as_f64(), None);
        assert_eq!(AttributeValue::Number(2.0).as_f64(), Some(2.0));
    }
}
