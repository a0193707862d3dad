use super::error::ProteomeError;
use super::ids::ProteinId;
use super::protein::Protein;
use slotmap::SlotMap;
use std::collections::HashMap;

/// A collection of proteins keyed by their unique identifier.
///
/// Iteration follows insertion order so that files written from a proteome are
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct Proteome {
    /// Primary storage for proteins.
    proteins: SlotMap<ProteinId, Protein>,
    /// Insertion order of proteins.
    order: Vec<ProteinId>,
    /// Lookup map from unique identifier to protein.
    unique_id_map: HashMap<String, ProteinId>,
}

impl Proteome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a protein to the proteome.
    ///
    /// # Errors
    ///
    /// Returns [`ProteomeError::DuplicateProtein`] if a protein with the same
    /// unique identifier is already present; the proteome is left unchanged.
    pub fn add_protein(&mut self, protein: Protein) -> Result<ProteinId, ProteomeError> {
        if self.unique_id_map.contains_key(protein.unique_id()) {
            return Err(ProteomeError::DuplicateProtein(
                protein.unique_id().to_string(),
            ));
        }
        let unique_id = protein.unique_id().to_string();
        let id = self.proteins.insert(protein);
        self.order.push(id);
        self.unique_id_map.insert(unique_id, id);
        Ok(id)
    }

    pub fn protein(&self, id: ProteinId) -> Option<&Protein> {
        self.proteins.get(id)
    }

    pub fn protein_mut(&mut self, id: ProteinId) -> Option<&mut Protein> {
        self.proteins.get_mut(id)
    }

    pub fn find_protein(&self, unique_id: &str) -> Option<&Protein> {
        self.unique_id_map
            .get(unique_id)
            .and_then(|&id| self.proteins.get(id))
    }

    pub fn find_protein_mut(&mut self, unique_id: &str) -> Option<&mut Protein> {
        let id = *self.unique_id_map.get(unique_id)?;
        self.proteins.get_mut(id)
    }

    pub fn contains(&self, unique_id: &str) -> bool {
        self.unique_id_map.contains_key(unique_id)
    }

    /// Iterates protein IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ProteinId> {
        self.order.iter().copied()
    }

    /// Iterates proteins in insertion order.
    pub fn proteins(&self) -> impl Iterator<Item = &Protein> {
        self.order.iter().filter_map(|&id| self.proteins.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes a protein and all of its annotations.
    pub fn remove_protein(&mut self, unique_id: &str) -> Option<Protein> {
        let id = self.unique_id_map.remove(unique_id)?;
        self.order.retain(|&other| other != id);
        self.proteins.remove(id)
    }
}

impl<'a> IntoIterator for &'a Proteome {
    type Item = &'a Protein;
    type IntoIter = Box<dyn Iterator<Item = &'a Protein> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.proteins())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::domain::DomainRecord;
    use crate::core::models::protein::InsertOptions;

    fn create_test_proteome() -> Proteome {
        let mut proteome = Proteome::new();
        proteome
            .add_protein(Protein::new("P1", "first", "MKVLAAGIL"))
            .unwrap();
        proteome
            .add_protein(Protein::new("P2", "second", "MSTNPKPQR"))
            .unwrap();
        proteome
            .add_protein(Protein::new("P0", "third", "MA"))
            .unwrap();
        proteome
    }

    #[test]
    fn proteins_iterate_in_insertion_order() {
        let proteome = create_test_proteome();
        let ids: Vec<_> = proteome.proteins().map(Protein::unique_id).collect();
        assert_eq!(ids, ["P1", "P2", "P0"]);
        let via_into_iter: Vec<_> = (&proteome).into_iter().map(|p| p.unique_id()).collect();
        assert_eq!(via_into_iter, ids);
        assert_eq!(proteome.len(), 3);
    }

    #[test]
    fn duplicate_unique_id_is_rejected_without_side_effects() {
        let mut proteome = create_test_proteome();
        let err = proteome
            .add_protein(Protein::new("P2", "impostor", "WWW"))
            .unwrap_err();
        assert_eq!(err, ProteomeError::DuplicateProtein("P2".into()));
        assert_eq!(proteome.len(), 3);
        assert_eq!(proteome.find_protein("P2").unwrap().name(), "second");
    }

    #[test]
    fn lookup_by_unique_id_and_by_key_agree() {
        let mut proteome = create_test_proteome();
        let id = proteome.ids().nth(1).unwrap();
        assert_eq!(proteome.protein(id).unwrap().unique_id(), "P2");
        assert!(proteome.contains("P0"));
        assert!(!proteome.contains("P9"));
        assert!(proteome.find_protein("P9").is_none());

        proteome
            .find_protein_mut("P2")
            .unwrap()
            .add_domain(DomainRecord::new(1, 3, "IDR"), InsertOptions::default())
            .unwrap();
        assert_eq!(proteome.protein(id).unwrap().num_domains(), 1);
    }

    #[test]
    fn remove_protein_drops_it_from_iteration_and_lookup() {
        let mut proteome = create_test_proteome();
        let removed = proteome.remove_protein("P2").unwrap();
        assert_eq!(removed.unique_id(), "P2");
        assert!(!proteome.contains("P2"));
        let ids: Vec<_> = proteome.proteins().map(Protein::unique_id).collect();
        assert_eq!(ids, ["P1", "P0"]);

        proteome
            .add_protein(Protein::new("P2", "again", "MK"))
            .unwrap();
        let ids: Vec<_> = proteome.proteins().map(Protein::unique_id).collect();
        assert_eq!(ids, ["P1", "P0", "P2"]);
    }
}
