//! Category-specialty catalog
//!
//! Immutable for the life of the process. Each category keeps a folded
//! "name + specialties" string that the category fallback matches against.

mod table;

use crate::search::normalize::fold;
use serde::Serialize;
use std::collections::HashMap;

/// Label used when a professional has no resolvable category
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub specialties: Vec<String>,
    #[serde(skip)]
    folded: String,
}

impl Category {
    pub fn new(id: u32, name: impl Into<String>, specialties: Vec<String>) -> Self {
        let name = name.into();
        let mut combined = name.clone();
        for specialty in &specialties {
            combined.push(' ');
            combined.push_str(specialty);
        }
        Self {
            id,
            folded: fold(&combined),
            name,
            specialties,
        }
    }

    /// Folded name and specialties joined by spaces
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Whether any token occurs inside the folded category text
    pub fn contains_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.folded.contains(t))
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        let by_id = categories
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.id, idx))
            .collect();
        Self { categories, by_id }
    }

    /// The built-in trade categories
    pub fn builtin() -> Self {
        Self::new(
            table::CATEGORIES
                .iter()
                .map(|(id, name, specialties)| {
                    Category::new(
                        *id,
                        *name,
                        specialties.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: u32) -> Option<&Category> {
        self.by_id.get(&id).map(|&idx| &self.categories[idx])
    }

    pub fn label(&self, id: u32) -> Option<&str> {
        self.get(id).map(|c| c.name.as_str())
    }

    /// Label of the first category id the catalog knows
    pub fn primary_label(&self, ids: &[u32]) -> &str {
        ids.iter()
            .find_map(|id| self.label(*id))
            .unwrap_or(UNCATEGORIZED_LABEL)
    }

    /// Ids of every category whose folded text contains one of the tokens
    pub fn matching(&self, tokens: &[&str]) -> Vec<u32> {
        self.categories
            .iter()
            .filter(|c| c.contains_any(tokens))
            .map(|c| c.id)
            .collect()
    }
}
