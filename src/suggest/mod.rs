//! Category suggestions for free-text problem descriptions
//!
//! "se me rompió la canilla" -> Plomería. The synonym table always runs; the
//! optional LLM client goes first when configured, and its reply is mapped back
//! onto catalog ids through the same table.

pub mod llm;
pub mod synonyms;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::Catalog;
pub use llm::{LlmClient, LlmError, LlmSettings};
pub use synonyms::SynonymTable;

/// Upper bound on categories returned per query
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySuggestion {
    pub id: u32,
    pub name: String,
}

pub struct Suggester {
    catalog: Arc<Catalog>,
    synonyms: SynonymTable,
    llm: Option<LlmClient>,
}

impl Suggester {
    pub fn new(catalog: Arc<Catalog>, llm: Option<LlmClient>) -> Self {
        let synonyms = SynonymTable::new(&catalog);
        Self {
            catalog,
            synonyms,
            llm,
        }
    }

    pub async fn suggest(&self, query: &str) -> Vec<CategorySuggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut ids = Vec::new();
        if let Some(llm) = &self.llm {
            match llm.suggest_categories(query, &self.catalog).await {
                Ok(reply) => ids.extend(self.ids_from_reply(&reply)),
                Err(e) => warn!("LLM suggestion failed, using synonyms only: {}", e),
            }
        }
        ids.extend(self.synonyms.resolve(query));

        let suggestions = self.collect(ids);
        debug!("Suggestions for {:?}: {:?}", query, suggestions);
        suggestions
    }

    /// Canonicalize each piece of a model reply, dropping anything off-catalog
    pub fn ids_from_reply(&self, reply: &str) -> Vec<u32> {
        llm::split_reply(reply)
            .into_iter()
            .filter_map(|piece| self.synonyms.canonicalize(piece))
            .collect()
    }

    fn collect(&self, ids: Vec<u32>) -> Vec<CategorySuggestion> {
        let mut seen = Vec::new();
        let mut out = Vec::new();
        for id in ids {
            if out.len() == MAX_SUGGESTIONS {
                break;
            }
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(name) = self.catalog.label(id) {
                out.push(CategorySuggestion {
                    id,
                    name: name.to_string(),
                });
            }
        }
        out
    }
}
