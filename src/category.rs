//! Category index: unique `(categoryId, categoryName)` pairs ordered by id

use crate::dataset::Dataset;

/// A category id with its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// Id-sorted category list built once from the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: Vec<Category>,
}

impl CategoryIndex {
    /// Build the index. When one id appears with several names, the first
    /// name in source row order is kept.
    pub fn build(dataset: &Dataset) -> Self {
        let mut pairs: Vec<(u32, &str)> = dataset
            .rows()
            .iter()
            .map(|r| (r.category_id, r.category_name.as_str()))
            .collect();

        // Stable: rows sharing an id keep their source order
        pairs.sort_by_key(|&(id, _)| id);
        pairs.dedup_by_key(|&mut (id, _)| id);

        Self {
            entries: pairs
                .into_iter()
                .map(|(id, name)| Category {
                    id,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|c| c.id)
    }

    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.entries
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|idx| self.entries[idx].name.as_str())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.name_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
