//! Category repository for JSON storage
//!
//! Each group's category list is stored as a JSON array of labels in
//! `data/categories/<group>.json`.

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{CategorySet, GroupId};

use super::file_io::{read_json, write_json_atomic};

/// Repository for per-group category sets
pub struct CategoryRepository {
    paths: LedgerPaths,
}

impl CategoryRepository {
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    /// Load a group's categories, `None` if never configured
    pub fn get(&self, group: &GroupId) -> Result<Option<CategorySet>, LedgerError> {
        let set: Option<CategorySet> = read_json(self.paths.categories_file(group))?;
        Ok(set.filter(|s| !s.is_empty()))
    }

    /// Replace a group's categories
    pub fn save(&self, group: &GroupId, categories: &CategorySet) -> Result<(), LedgerError> {
        write_json_atomic(self.paths.categories_file(group), categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let repo = CategoryRepository::new(paths.clone());
        let group = GroupId::parse("-42").unwrap();

        assert!(repo.get(&group).unwrap().is_none());

        let set = CategorySet::parse_list("Food, Rent").unwrap();
        repo.save(&group, &set).unwrap();

        assert_eq!(repo.get(&group).unwrap(), Some(set));
        let text = std::fs::read_to_string(paths.categories_file(&group)).unwrap();
        assert!(text.contains("\"Food\""));
    }

    #[test]
    fn test_empty_array_reads_as_unconfigured() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let group = GroupId::parse("g").unwrap();
        std::fs::write(paths.categories_file(&group), "[]").unwrap();

        let repo = CategoryRepository::new(paths);
        assert!(repo.get(&group).unwrap().is_none());
    }
}
