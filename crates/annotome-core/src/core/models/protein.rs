use super::attributes::Attributes;
use super::domain::{Domain, DomainRecord};
use super::error::AnnotationError;
use super::ids::{DomainId, SiteId};
use super::site::{Site, SiteRecord};
use slotmap::SlotMap;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::trace;

/// Controls how [`Protein::add_domain`] treats name collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOptions {
    /// Reject a colliding name with an error instead of skipping the domain.
    pub safe: bool,
    /// Generate a unique name by appending a numeric suffix.
    pub autoname: bool,
}

impl Default for InsertOptions {
    fn default() -> Self {
        Self {
            safe: true,
            autoname: false,
        }
    }
}

/// Why an insertion was declined without being an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    DuplicateName(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DuplicateName(name) => write!(f, "a domain named '{}' already exists", name),
        }
    }
}

/// Result of a successful call to an insertion method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion<K> {
    Inserted(K),
    Skipped(SkipReason),
}

impl<K> Insertion<K> {
    pub fn inserted(self) -> Option<K> {
        match self {
            Insertion::Inserted(key) => Some(key),
            Insertion::Skipped(_) => None,
        }
    }
}

/// A single polypeptide: an immutable sequence plus its domain and site annotations.
///
/// Every annotation attached to a protein lies within `1..=len()` (1-based,
/// inclusive). This is checked at insertion time and cannot be violated
/// afterwards since the sequence never changes.
#[derive(Debug, Clone)]
pub struct Protein {
    unique_id: String,
    name: String,
    sequence: String,
    length: usize,
    /// Primary storage for domains.
    domains: SlotMap<DomainId, Domain>,
    /// Insertion order of domains, used for iteration and output.
    domain_order: Vec<DomainId>,
    /// Lookup map for finding domains by their unique name.
    domain_name_map: HashMap<String, DomainId>,
    /// Primary storage for sites.
    sites: SlotMap<SiteId, Site>,
    /// Insertion order of sites, used for iteration and output.
    site_order: Vec<SiteId>,
    /// Lookup map for finding all sites at a given position.
    site_position_map: BTreeMap<usize, Vec<SiteId>>,
}

impl Protein {
    /// Creates a protein with no annotations.
    ///
    /// # Arguments
    ///
    /// * `unique_id` - The identifier used to key the protein in a proteome.
    /// * `name` - A free-text name, typically the full FASTA header.
    /// * `sequence` - The primary sequence.
    pub fn new(unique_id: &str, name: &str, sequence: &str) -> Self {
        Self {
            unique_id: unique_id.to_string(),
            name: name.to_string(),
            sequence: sequence.to_string(),
            length: sequence.chars().count(),
            domains: SlotMap::with_key(),
            domain_order: Vec::new(),
            domain_name_map: HashMap::new(),
            sites: SlotMap::with_key(),
            site_order: Vec::new(),
            site_position_map: BTreeMap::new(),
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Number of residues in the sequence.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the residue at a 1-based position.
    pub fn residue(&self, position: usize) -> Option<char> {
        self.sequence.chars().nth(position.checked_sub(1)?)
    }

    /// Returns the sub-sequence spanning `start..=end` (1-based, inclusive).
    ///
    /// # Return
    ///
    /// Returns `None` if the interval is empty or not fully inside the sequence.
    pub fn region(&self, start: usize, end: usize) -> Option<&str> {
        if start == 0 || start > end || end > self.length {
            return None;
        }
        let mut offsets = self
            .sequence
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(self.sequence.len()));
        let from = offsets.nth(start - 1)?;
        let to = offsets.nth(end - start)?;
        Some(&self.sequence[from..to])
    }

    fn check_position(&self, position: isize) -> Result<usize, AnnotationError> {
        if position < 1 || position as usize > self.length {
            return Err(AnnotationError::SiteOutOfBounds {
                unique_id: self.unique_id.clone(),
                position,
                length: self.length,
            });
        }
        Ok(position as usize)
    }

    fn check_interval(&self, start: isize, end: isize) -> Result<(usize, usize), AnnotationError> {
        if start > end {
            return Err(AnnotationError::InvalidInterval {
                unique_id: self.unique_id.clone(),
                start,
                end,
            });
        }
        if start < 1 || end as usize > self.length {
            return Err(AnnotationError::DomainOutOfBounds {
                unique_id: self.unique_id.clone(),
                start,
                end,
                length: self.length,
            });
        }
        Ok((start as usize, end as usize))
    }

    // --- Domains ---

    /// Attaches a domain, naming it `{domain_type}_{start}_{end}`.
    ///
    /// With `options.autoname`, a suffix `_1`, `_2`, ... is appended until the name
    /// is free. Otherwise a collision is an error under `options.safe` and a skip
    /// without it.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError`] if the interval is invalid or outside the
    /// sequence, or on a name collision in safe mode.
    pub fn add_domain(
        &mut self,
        record: DomainRecord,
        options: InsertOptions,
    ) -> Result<Insertion<DomainId>, AnnotationError> {
        let (start, end) = self.check_interval(record.start, record.end)?;
        let base_name = record.default_name();
        let name = if options.autoname {
            self.next_free_domain_name(&base_name)
        } else {
            base_name
        };
        self.insert_domain(name, start, end, record, options.safe)
    }

    /// Attaches a domain under a caller-supplied name.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Protein::add_domain`].
    pub fn add_named_domain(
        &mut self,
        name: &str,
        record: DomainRecord,
        safe: bool,
    ) -> Result<Insertion<DomainId>, AnnotationError> {
        let (start, end) = self.check_interval(record.start, record.end)?;
        self.insert_domain(name.to_string(), start, end, record, safe)
    }

    fn next_free_domain_name(&self, base_name: &str) -> String {
        if !self.domain_name_map.contains_key(base_name) {
            return base_name.to_string();
        }
        (1..)
            .map(|suffix| format!("{}_{}", base_name, suffix))
            .find(|candidate| !self.domain_name_map.contains_key(candidate))
            .unwrap_or_else(|| base_name.to_string())
    }

    fn insert_domain(
        &mut self,
        name: String,
        start: usize,
        end: usize,
        record: DomainRecord,
        safe: bool,
    ) -> Result<Insertion<DomainId>, AnnotationError> {
        if self.domain_name_map.contains_key(&name) {
            if safe {
                return Err(AnnotationError::DuplicateName {
                    unique_id: self.unique_id.clone(),
                    name,
                });
            }
            trace!(protein = %self.unique_id, %name, "Skipping domain with duplicate name");
            return Ok(Insertion::Skipped(SkipReason::DuplicateName(name)));
        }

        let domain = Domain::new(
            name.clone(),
            start,
            end,
            record.domain_type,
            record.attributes,
        );
        let id = self.domains.insert(domain);
        self.domain_order.push(id);
        self.domain_name_map.insert(name, id);
        Ok(Insertion::Inserted(id))
    }

    pub fn domain(&self, id: DomainId) -> Option<&Domain> {
        self.domains.get(id)
    }

    /// Mutable access to a domain's attributes. Its name and interval are fixed.
    pub fn domain_attributes_mut(&mut self, id: DomainId) -> Option<&mut Attributes> {
        self.domains.get_mut(id).map(|domain| &mut domain.attributes)
    }

    pub fn domain_by_name(&self, name: &str) -> Option<&Domain> {
        self.domain_name_map
            .get(name)
            .and_then(|&id| self.domains.get(id))
    }

    /// Iterates domains in insertion order.
    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.domain_order
            .iter()
            .filter_map(|&id| self.domains.get(id))
    }

    pub fn domains_by_type(&self, domain_type: &str) -> impl Iterator<Item = &Domain> {
        self.domains()
            .filter(move |domain| domain.domain_type == domain_type)
    }

    /// Iterates domains whose interval covers `position`.
    pub fn domains_at(&self, position: usize) -> impl Iterator<Item = &Domain> {
        self.domains().filter(move |domain| domain.contains(position))
    }

    pub fn num_domains(&self) -> usize {
        self.domain_order.len()
    }

    /// Removes a domain by name.
    ///
    /// # Return
    ///
    /// Returns `Some(Domain)` if a domain with that name existed, otherwise `None`.
    pub fn remove_domain(&mut self, name: &str) -> Option<Domain> {
        let id = self.domain_name_map.remove(name)?;
        self.domain_order.retain(|&other| other != id);
        self.domains.remove(id)
    }

    // --- Sites ---

    /// Attaches a site. Several sites may share a position.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::SiteOutOfBounds`] if the position is outside
    /// the sequence.
    pub fn add_site(&mut self, record: SiteRecord) -> Result<SiteId, AnnotationError> {
        let position = self.check_position(record.position)?;
        let site = Site {
            position,
            site_type: record.site_type,
            symbol: record.symbol,
            value: record.value,
            attributes: record.attributes,
        };
        let id = self.sites.insert(site);
        self.site_order.push(id);
        self.site_position_map.entry(position).or_default().push(id);
        Ok(id)
    }

    pub fn site(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(id)
    }

    pub fn site_attributes_mut(&mut self, id: SiteId) -> Option<&mut Attributes> {
        self.sites.get_mut(id).map(|site| &mut site.attributes)
    }

    /// Iterates sites in insertion order.
    pub fn sites(&self) -> impl Iterator<Item = &Site> {
        self.site_order.iter().filter_map(|&id| self.sites.get(id))
    }

    pub fn sites_at(&self, position: usize) -> impl Iterator<Item = &Site> {
        self.site_position_map
            .get(&position)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.sites.get(id))
    }

    pub fn sites_by_type(&self, site_type: &str) -> impl Iterator<Item = &Site> {
        self.sites().filter(move |site| site.site_type == site_type)
    }

    pub fn num_sites(&self) -> usize {
        self.site_order.len()
    }

    /// Removes every site at `position`, returning them in insertion order.
    pub fn remove_sites_at(&mut self, position: usize) -> Vec<Site> {
        let Some(ids) = self.site_position_map.remove(&position) else {
            return Vec::new();
        };
        self.site_order.retain(|id| !ids.contains(id));
        ids.into_iter()
            .filter_map(|id| self.sites.remove(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protein_of_length(length: usize) -> Protein {
        Protein::new("P1", "test protein", &"ACDEFGHIKL".repeat(length / 10))
    }

    #[test]
    fn new_protein_reports_sequence_and_length() {
        let protein = Protein::new("P1", "sp|P1|TEST", "MKV");
        assert_eq!(protein.unique_id(), "P1");
        assert_eq!(protein.name(), "sp|P1|TEST");
        assert_eq!(protein.sequence(), "MKV");
        assert_eq!(protein.len(), 3);
        assert!(!protein.is_empty());
        assert_eq!(protein.num_domains(), 0);
        assert_eq!(protein.num_sites(), 0);
    }

    #[test]
    fn residue_and_region_use_one_based_inclusive_positions() {
        let protein = Protein::new("P1", "", "MKVLA");
        assert_eq!(protein.residue(1), Some('M'));
        assert_eq!(protein.residue(5), Some('A'));
        assert_eq!(protein.residue(0), None);
        assert_eq!(protein.residue(6), None);

        assert_eq!(protein.region(2, 4), Some("KVL"));
        assert_eq!(protein.region(1, 5), Some("MKVLA"));
        assert_eq!(protein.region(5, 5), Some("A"));
        assert_eq!(protein.region(0, 2), None);
        assert_eq!(protein.region(4, 2), None);
        assert_eq!(protein.region(3, 6), None);
    }

    mod domains {
        use super::*;

        #[test]
        fn add_domain_within_bounds_succeeds() {
            let mut protein = protein_of_length(50);
            let mut attributes = Attributes::new();
            attributes.insert("conf".into(), "0.9".into());
            let record = DomainRecord::new(10, 20, "IDR").with_attributes(attributes.clone());

            let id = protein
                .add_domain(record, InsertOptions::default())
                .unwrap()
                .inserted()
                .unwrap();

            let domain = protein.domain(id).unwrap();
            assert_eq!(domain.name, "IDR_10_20");
            assert_eq!((domain.start, domain.end), (10, 20));
            assert_eq!(domain.domain_type, "IDR");
            assert_eq!(domain.attributes, attributes);
            assert_eq!(protein.region(domain.start, domain.end).unwrap().len(), 11);
        }

        #[test]
        fn domain_spanning_entire_sequence_is_accepted() {
            let mut protein = protein_of_length(50);
            let result = protein.add_domain(DomainRecord::new(1, 50, "FULL"), InsertOptions::default());
            assert!(matches!(result, Ok(Insertion::Inserted(_))));
        }

        #[test]
        fn domain_outside_sequence_is_rejected() {
            let mut protein = protein_of_length(50);
            let err = protein
                .add_domain(DomainRecord::new(40, 51, "IDR"), InsertOptions::default())
                .unwrap_err();
            assert!(matches!(
                err,
                AnnotationError::DomainOutOfBounds {
                    start: 40,
                    end: 51,
                    length: 50,
                    ..
                }
            ));
            assert!(err.is_bounds_error());

            let err = protein
                .add_domain(DomainRecord::new(0, 5, "IDR"), InsertOptions::default())
                .unwrap_err();
            assert!(matches!(err, AnnotationError::DomainOutOfBounds { .. }));
            assert_eq!(protein.num_domains(), 0);
        }

        #[test]
        fn inverted_interval_is_rejected() {
            let mut protein = protein_of_length(50);
            let err = protein
                .add_domain(DomainRecord::new(20, 10, "IDR"), InsertOptions::default())
                .unwrap_err();
            assert!(matches!(
                err,
                AnnotationError::InvalidInterval { start: 20, end: 10, .. }
            ));
        }

        #[test]
        fn duplicate_name_in_safe_mode_is_an_error() {
            let mut protein = protein_of_length(50);
            protein
                .add_domain(DomainRecord::new(10, 20, "IDR"), InsertOptions::default())
                .unwrap();
            let err = protein
                .add_domain(DomainRecord::new(10, 20, "IDR"), InsertOptions::default())
                .unwrap_err();
            assert_eq!(
                err,
                AnnotationError::DuplicateName {
                    unique_id: "P1".into(),
                    name: "IDR_10_20".into(),
                }
            );
            assert!(!err.is_bounds_error());
            assert_eq!(protein.num_domains(), 1);
        }

        #[test]
        fn duplicate_name_in_unsafe_mode_is_skipped() {
            let mut protein = protein_of_length(50);
            let options = InsertOptions {
                safe: false,
                autoname: false,
            };
            protein
                .add_domain(DomainRecord::new(10, 20, "IDR"), options)
                .unwrap();
            let second = protein
                .add_domain(DomainRecord::new(10, 20, "IDR"), options)
                .unwrap();
            assert_eq!(
                second,
                Insertion::Skipped(SkipReason::DuplicateName("IDR_10_20".into()))
            );
            assert_eq!(protein.num_domains(), 1);
        }

        #[test]
        fn autoname_appends_increasing_suffixes() {
            let mut protein = protein_of_length(50);
            let options = InsertOptions {
                safe: true,
                autoname: true,
            };
            for _ in 0..3 {
                protein
                    .add_domain(DomainRecord::new(10, 20, "IDR"), options)
                    .unwrap();
            }
            let names: Vec<_> = protein.domains().map(|d| d.name.as_str()).collect();
            assert_eq!(names, ["IDR_10_20", "IDR_10_20_1", "IDR_10_20_2"]);
        }

        #[test]
        fn named_domain_uses_caller_name() {
            let mut protein = protein_of_length(50);
            protein
                .add_named_domain("disordered", DomainRecord::new(1, 5, "IDR"), true)
                .unwrap();
            assert_eq!(protein.domain_by_name("disordered").unwrap().end, 5);
            assert!(
                protein
                    .add_named_domain("disordered", DomainRecord::new(6, 9, "IDR"), true)
                    .is_err()
            );
        }

        #[test]
        fn overlapping_domains_are_permitted_and_queryable() {
            let mut protein = protein_of_length(50);
            let options = InsertOptions::default();
            protein.add_domain(DomainRecord::new(1, 20, "IDR"), options).unwrap();
            protein.add_domain(DomainRecord::new(15, 30, "PLD"), options).unwrap();
            protein.add_domain(DomainRecord::new(40, 45, "IDR"), options).unwrap();

            assert_eq!(protein.domains_at(17).count(), 2);
            assert_eq!(protein.domains_at(35).count(), 0);
            assert_eq!(protein.domains_by_type("IDR").count(), 2);
            assert_eq!(protein.domains_by_type("PLD").count(), 1);
        }

        #[test]
        fn remove_domain_frees_its_name() {
            let mut protein = protein_of_length(50);
            let options = InsertOptions::default();
            protein.add_domain(DomainRecord::new(1, 20, "IDR"), options).unwrap();
            protein.add_domain(DomainRecord::new(25, 30, "IDR"), options).unwrap();

            let removed = protein.remove_domain("IDR_1_20").unwrap();
            assert_eq!(removed.start, 1);
            assert_eq!(protein.num_domains(), 1);
            assert!(protein.domain_by_name("IDR_1_20").is_none());
            assert!(protein.remove_domain("IDR_1_20").is_none());

            protein.add_domain(DomainRecord::new(1, 20, "IDR"), options).unwrap();
            let names: Vec<_> = protein.domains().map(|d| d.name.as_str()).collect();
            assert_eq!(names, ["IDR_25_30", "IDR_1_20"]);
        }

        #[test]
        fn attributes_can_change_while_name_and_interval_stay_indexed() {
            let mut protein = protein_of_length(50);
            let id = protein
                .add_named_domain("disordered", DomainRecord::new(1, 5, "IDR"), true)
                .unwrap()
                .inserted()
                .unwrap();

            protein
                .domain_attributes_mut(id)
                .unwrap()
                .insert("conf".into(), "0.9".into());

            let domain = protein.domain_by_name("disordered").unwrap();
            assert_eq!((domain.start, domain.end), (1, 5));
            assert_eq!(domain.attributes["conf"].as_str(), Some("0.9"));
            assert!(
                protein
                    .add_named_domain("disordered", DomainRecord::new(6, 9, "IDR"), true)
                    .is_err()
            );
        }
    }

    mod sites {
        use super::*;

        #[test]
        fn add_site_within_bounds_succeeds() {
            let mut protein = protein_of_length(30);
            let id = protein.add_site(SiteRecord::new(5, "PTM", "S", 0.8)).unwrap();
            let site = protein.site(id).unwrap();
            assert_eq!(site.position, 5);
            assert_eq!(site.site_type, "PTM");
            assert_eq!(site.symbol, "S");
            assert_eq!(site.value, 0.8);
        }

        #[test]
        fn site_outside_sequence_is_rejected() {
            let mut protein = protein_of_length(30);
            for position in [0, -3, 31, 999] {
                let err = protein
                    .add_site(SiteRecord::new(position, "PTM", "S", 0.8))
                    .unwrap_err();
                assert_eq!(
                    err,
                    AnnotationError::SiteOutOfBounds {
                        unique_id: "P1".into(),
                        position,
                        length: 30,
                    }
                );
            }
            assert_eq!(protein.num_sites(), 0);
        }

        #[test]
        fn multiple_sites_may_share_a_position() {
            let mut protein = protein_of_length(30);
            protein.add_site(SiteRecord::new(7, "PTM", "S", 1.0)).unwrap();
            protein.add_site(SiteRecord::new(7, "MUT", "A", 0.0)).unwrap();
            protein.add_site(SiteRecord::new(9, "PTM", "T", 0.5)).unwrap();

            assert_eq!(protein.sites_at(7).count(), 2);
            assert_eq!(protein.sites_at(8).count(), 0);
            assert_eq!(protein.sites_by_type("PTM").count(), 2);
            let order: Vec<_> = protein.sites().map(|s| s.position).collect();
            assert_eq!(order, [7, 7, 9]);
        }

        #[test]
        fn remove_sites_at_clears_only_that_position() {
            let mut protein = protein_of_length(30);
            protein.add_site(SiteRecord::new(7, "PTM", "S", 1.0)).unwrap();
            protein.add_site(SiteRecord::new(9, "PTM", "T", 0.5)).unwrap();
            protein.add_site(SiteRecord::new(7, "MUT", "A", 0.0)).unwrap();

            let removed = protein.remove_sites_at(7);
            assert_eq!(removed.len(), 2);
            assert_eq!(removed[0].site_type, "PTM");
            assert_eq!(removed[1].site_type, "MUT");
            assert_eq!(protein.num_sites(), 1);
            assert!(protein.remove_sites_at(7).is_empty());
        }

        #[test]
        fn site_attributes_can_change_without_moving_the_site() {
            let mut protein = protein_of_length(30);
            let id = protein.add_site(SiteRecord::new(2, "PTM", "S", 1.0)).unwrap();
            protein
                .site_attributes_mut(id)
                .unwrap()
                .insert("kinase".into(), "CK2".into());

            let at_two: Vec<_> = protein.sites_at(2).map(|s| s.position).collect();
            assert_eq!(at_two, [2]);
            assert_eq!(
                protein.site(id).unwrap().attributes["kinase"].as_str(),
                Some("CK2")
            );
        }
    }
}
