use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single link under a section, with its href already rewritten for pages
/// one directory below the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub name: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Section name -> links, in document order.
pub type SectionMap = IndexMap<String, Vec<LinkEntry>>;

/// Category name -> sections, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuStructure {
    categories: IndexMap<String, SectionMap>,
}

impl MenuStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a category. A category with the same name is replaced but
    /// keeps its original position.
    pub fn insert_category(&mut self, name: impl Into<String>, sections: SectionMap) {
        self.categories.insert(name.into(), sections);
    }

    pub fn category(&self, name: &str) -> Option<&SectionMap> {
        self.categories.get(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &SectionMap)> {
        self.categories.iter()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &String> {
        self.categories.keys()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|sections| sections.values())
            .map(Vec::len)
            .sum()
    }
}
