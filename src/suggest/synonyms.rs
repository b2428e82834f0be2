//! Synonym table: everyday words -> canonical trade category
//!
//! Keys are folded once into a map. Lookups walk the folded query tokens left
//! to right, trying the longest phrase key at each position first, so the
//! outcome never depends on table order.

use std::collections::HashMap;

use tracing::warn;

use crate::catalog::Catalog;
use crate::search::normalize::{fold, tokenize};

/// (word or short phrase, canonical category name)
const SYNONYMS: &[(&str, &str)] = &[
    ("plomero", "Plomería"),
    ("caño", "Plomería"),
    ("caños", "Plomería"),
    ("canilla", "Plomería"),
    ("canillas", "Plomería"),
    ("pérdida", "Plomería"),
    ("gotea", "Plomería"),
    ("inodoro", "Plomería"),
    ("destapar", "Plomería"),
    ("cloaca", "Plomería"),
    ("termotanque", "Plomería"),
    ("electricista", "Electricista"),
    ("luz", "Electricista"),
    ("enchufe", "Electricista"),
    ("cortocircuito", "Electricista"),
    ("disyuntor", "Electricista"),
    ("térmica", "Electricista"),
    ("cable", "Electricista"),
    ("gas", "Gasista"),
    ("estufa", "Gasista"),
    ("calefón", "Gasista"),
    ("olor a gas", "Gasista"),
    ("garrafa", "Gasista"),
    ("albañil", "Albañilería"),
    ("pared", "Albañilería"),
    ("humedad", "Albañilería"),
    ("ladrillo", "Albañilería"),
    ("revoque", "Albañilería"),
    ("pintor", "Pintura"),
    ("pintar", "Pintura"),
    ("carpintero", "Carpintería"),
    ("mueble", "Carpintería"),
    ("placard", "Carpintería"),
    ("madera", "Carpintería"),
    ("herrero", "Herrería"),
    ("reja", "Herrería"),
    ("portón", "Herrería"),
    ("soldar", "Herrería"),
    ("cerrajero", "Cerrajería"),
    ("llave", "Cerrajería"),
    ("cerradura", "Cerrajería"),
    ("me quedé afuera", "Cerrajería"),
    ("jardinero", "Jardinería"),
    ("pasto", "Jardinería"),
    ("árbol", "Jardinería"),
    ("poda", "Jardinería"),
    ("aire", "Aire acondicionado"),
    ("split", "Aire acondicionado"),
    ("aire acondicionado", "Aire acondicionado"),
    ("techo", "Techista"),
    ("gotera", "Techista"),
    ("membrana", "Techista"),
    ("canaleta", "Techista"),
    ("limpieza", "Limpieza"),
    ("limpiar", "Limpieza"),
    ("flete", "Fletes y mudanzas"),
    ("mudanza", "Fletes y mudanzas"),
    ("lavarropas", "Reparación de electrodomésticos"),
    ("heladera", "Reparación de electrodomésticos"),
    ("microondas", "Reparación de electrodomésticos"),
];

#[derive(Debug, Clone)]
pub struct SynonymTable {
    /// folded key -> category id
    map: HashMap<String, u32>,
}

/// Fold and collapse inner whitespace
fn normalize_key(text: &str) -> String {
    tokenize(text).join(" ")
}

impl SynonymTable {
    /// Build from the static pairs plus every catalog category name
    pub fn new(catalog: &Catalog) -> Self {
        let names: HashMap<String, u32> = catalog
            .categories()
            .iter()
            .map(|c| (fold(c.name.trim()), c.id))
            .collect();

        let mut map = HashMap::new();
        for category in catalog.categories() {
            map.insert(normalize_key(&category.name), category.id);
        }
        for (word, canonical) in SYNONYMS {
            match names.get(&fold(canonical.trim())) {
                Some(&id) => {
                    map.insert(normalize_key(word), id);
                }
                None => warn!("Synonym {:?} points at unknown category {:?}", word, canonical),
            }
        }

        Self { map }
    }

    /// Exact lookup of a whole phrase after normalization
    pub fn lookup(&self, phrase: &str) -> Option<u32> {
        self.map.get(&normalize_key(phrase)).copied()
    }

    /// Category ids mentioned in free text, in first-seen order, without duplicates
    pub fn resolve(&self, text: &str) -> Vec<u32> {
        let tokens = tokenize(text);
        let mut found = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let mut step = 1;
            let mut hit = None;

            for width in (1..=3).rev() {
                if i + width > tokens.len() {
                    continue;
                }
                let key = tokens[i..i + width].join(" ");
                if let Some(&id) = self.map.get(&key) {
                    hit = Some(id);
                    step = width;
                    break;
                }
            }

            if let Some(id) = hit {
                if !found.contains(&id) {
                    found.push(id);
                }
            }
            i += step;
        }

        found
    }

    /// Map a free-form category name (e.g. from the LLM) to an id
    pub fn canonicalize(&self, candidate: &str) -> Option<u32> {
        let cleaned = candidate.trim().trim_matches(|c: char| !c.is_alphanumeric());
        if cleaned.is_empty() {
            return None;
        }
        self.lookup(cleaned)
            .or_else(|| self.resolve(cleaned).into_iter().next())
    }
}
