//! In-memory store and the built-in seed professionals
//!
//! Used when no professionals file is configured, and by tests.

use super::{Professional, ProfessionalStore, StoreError};
use async_trait::async_trait;

pub struct MemoryStore {
    professionals: Vec<Professional>,
}

impl MemoryStore {
    pub fn new(professionals: Vec<Professional>) -> Self {
        Self { professionals }
    }

    /// Store preloaded with the seed professionals
    pub fn seeded() -> Self {
        Self::new(seed_professionals())
    }
}

#[async_trait]
impl ProfessionalStore for MemoryStore {
    async fn eligible_professionals(&self) -> Result<Vec<Professional>, StoreError> {
        Ok(self
            .professionals
            .iter()
            .filter(|p| p.is_eligible())
            .cloned()
            .collect())
    }
}

fn seed(
    id: &str,
    name: &str,
    description: &str,
    specialties: &[&str],
    categories: &[u32],
    avg_rating: f64,
    review_count: u32,
) -> Professional {
    Professional {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        categories: categories.to_vec(),
        avg_rating,
        review_count,
        photo_url: None,
        phone: None,
        active: true,
        subscription_active: true,
    }
}

/// Sample profiles covering the main trades of the catalog
pub fn seed_professionals() -> Vec<Professional> {
    let mut pros = vec![
        seed(
            "seed-001",
            "Carlos Medina",
            "Plomero matriculado con 20 años de experiencia en Bahía Blanca.",
            &["Reparación de fugas", "Destapaciones", "Instalación de canillas"],
            &[1],
            4.8,
            37,
        ),
        seed(
            "seed-002",
            "Lucía Fernández",
            "Electricista domiciliaria. Presupuestos sin cargo.",
            &["Tableros eléctricos", "Cableado", "Iluminación LED"],
            &[2],
            4.9,
            52,
        ),
        seed(
            "seed-003",
            "Roberto Sosa",
            "Gasista matriculado. Habilitaciones y pruebas de hermeticidad.",
            &["Instalación de gas", "Calefones", "Estufas"],
            &[3],
            4.6,
            21,
        ),
        seed(
            "seed-004",
            "Martín Aguirre",
            "Refacciones integrales, trabajos de albañilería en general.",
            &["Revoques", "Contrapisos", "Humedad en paredes"],
            &[4, 5],
            4.3,
            14,
        ),
        seed(
            "seed-005",
            "Sofía Benítez",
            "Pintura de interiores y exteriores, impermeabilizaciones.",
            &["Pintura interior", "Impermeabilización"],
            &[5],
            4.7,
            28,
        ),
        seed(
            "seed-006",
            "Diego Romero",
            "Carpintería en madera maciza y melamina.",
            &["Muebles a medida", "Placares"],
            &[6],
            4.5,
            19,
        ),
        seed(
            "seed-007",
            "Hernán Castro",
            "Herrería artística y de obra.",
            &["Rejas", "Portones", "Soldadura"],
            &[7],
            4.2,
            9,
        ),
        seed(
            "seed-008",
            "Gabriela Ruiz",
            "Cerrajería las 24 horas, atención en toda la ciudad.",
            &["Apertura de puertas", "Cambio de cerraduras"],
            &[8],
            4.4,
            31,
        ),
        seed(
            "seed-009",
            "Pablo Giménez",
            "Mantenimiento de jardines y espacios verdes.",
            &["Corte de pasto", "Poda"],
            &[9],
            4.1,
            11,
        ),
        seed(
            "seed-010",
            "Andrea Molina",
            "Instalación y service de equipos split.",
            &["Instalación de splits", "Carga de gas refrigerante"],
            &[10],
            4.6,
            24,
        ),
        seed(
            "seed-011",
            "Jorge Paredes",
            "Techos de chapa y losa, membranas líquidas y asfálticas.",
            &["Membranas", "Goteras", "Canaletas"],
            &[11],
            4.0,
            7,
        ),
        seed(
            "seed-012",
            "Fletes El Puerto",
            "Mudanzas y fletes dentro de Bahía Blanca y la zona.",
            &["Mudanzas", "Fletes"],
            &[13],
            4.3,
            16,
        ),
    ];

    // A lapsed subscription keeps the profile but hides it from search
    let mut lapsed = seed(
        "seed-013",
        "Walter Peralta",
        "Plomería y gas.",
        &["Destapaciones"],
        &[1, 3],
        3.9,
        5,
    );
    lapsed.subscription_active = false;
    pros.push(lapsed);

    pros
}
