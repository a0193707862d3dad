use super::attributes::Attributes;

/// A site as read from an interchange file, before it is attached to a protein.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    pub position: isize,
    pub site_type: String,
    pub symbol: String,
    pub value: f64,
    pub attributes: Attributes,
}

impl SiteRecord {
    pub fn new(position: isize, site_type: &str, symbol: &str, value: f64) -> Self {
        Self {
            position,
            site_type: site_type.to_string(),
            symbol: symbol.to_string(),
            value,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A point annotation owned by a [`Protein`](super::protein::Protein).
///
/// The symbol is stored as given and is not checked against the residue at
/// `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub position: usize, // 1-based
    pub site_type: String,
    pub symbol: String,
    pub value: f64,
    pub attributes: Attributes,
}

impl Site {
    pub fn to_record(&self) -> SiteRecord {
        SiteRecord {
            position: self.position as isize,
            site_type: self.site_type.clone(),
            symbol: self.symbol.clone(),
            value: self.value,
            attributes: self.attributes.clone(),
        }
    }
}
