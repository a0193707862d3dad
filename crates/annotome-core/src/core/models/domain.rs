use super::attributes::Attributes;

/// A domain as read from an interchange file, before it is attached to a protein.
///
/// Positions are kept signed so that out-of-range values survive parsing and are
/// rejected by the protein at insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    pub start: isize,
    pub end: isize,
    pub domain_type: String,
    pub attributes: Attributes,
}

impl DomainRecord {
    pub fn new(start: isize, end: isize, domain_type: &str) -> Self {
        Self {
            start,
            end,
            domain_type: domain_type.to_string(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The name a domain gets when the caller does not supply one.
    pub fn default_name(&self) -> String {
        format!("{}_{}_{}", self.domain_type, self.start, self.end)
    }
}

/// An interval annotation owned by a [`Protein`](super::protein::Protein).
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub name: String,
    pub start: usize, // 1-based, inclusive
    pub end: usize,   // 1-based, inclusive
    pub domain_type: String,
    pub attributes: Attributes,
}

impl Domain {
    pub(crate) fn new(
        name: String,
        start: usize,
        end: usize,
        domain_type: String,
        attributes: Attributes,
    ) -> Self {
        Self {
            name,
            start,
            end,
            domain_type,
            attributes,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn overlaps(&self, other: &Domain) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn to_record(&self) -> DomainRecord {
        DomainRecord {
            start: self.start as isize,
            end: self.end as isize,
            domain_type: self.domain_type.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(start: usize, end: usize) -> Domain {
        Domain::new(
            format!("IDR_{}_{}", start, end),
            start,
            end,
            "IDR".to_string(),
            Attributes::new(),
        )
    }

    #[test]
    fn default_name_combines_type_and_bounds() {
        let record = DomainRecord::new(10, 20, "IDR");
        assert_eq!(record.default_name(), "IDR_10_20");
    }

    #[test]
    fn length_and_containment_are_inclusive() {
        let d = domain(10, 20);
        assert_eq!(d.len(), 11);
        assert!(d.contains(10));
        assert!(d.contains(20));
        assert!(!d.contains(9));
        assert!(!d.contains(21));
    }

    #[test]
    fn overlap_detects_shared_residues_only() {
        let a = domain(10, 20);
        assert!(a.overlaps(&domain(20, 30)));
        assert!(a.overlaps(&domain(1, 10)));
        assert!(a.overlaps(&domain(12, 15)));
        assert!(!a.overlaps(&domain(21, 30)));
    }

    #[test]
    fn to_record_preserves_fields() {
        let mut d = domain(3, 7);
        d.attributes.insert("conf".into(), "0.9".into());
        let record = d.to_record();
        assert_eq!(record.start, 3);
        assert_eq!(record.end, 7);
        assert_eq!(record.domain_type, "IDR");
        assert_eq!(record.attributes, d.attributes);
    }
}
