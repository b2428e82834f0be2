//! Built-in trade categories
//!
//! Ids are stable: professional records reference them.

/// (id, name, specialties)
pub(crate) const CATEGORIES: &[(u32, &str, &[&str])] = &[
    (
        1,
        "Plomería",
        &[
            "Reparación de fugas",
            "Destapaciones",
            "Instalación de canillas",
            "Cañerías",
            "Termotanques",
            "Inodoros y depósitos",
        ],
    ),
    (
        2,
        "Electricista",
        &[
            "Instalaciones de luz",
            "Tableros eléctricos",
            "Cableado",
            "Enchufes y tomas",
            "Iluminación",
        ],
    ),
    (
        3,
        "Gasista",
        &[
            "Instalación de gas",
            "Estufas",
            "Calefones",
            "Cocinas",
            "Pruebas de hermeticidad",
        ],
    ),
    (
        4,
        "Albañilería",
        &[
            "Construcción",
            "Revoques",
            "Contrapisos",
            "Humedad en paredes",
            "Refacciones",
        ],
    ),
    (
        5,
        "Pintura",
        &[
            "Pintura interior",
            "Pintura exterior",
            "Impermeabilización",
            "Empapelado",
        ],
    ),
    (
        6,
        "Carpintería",
        &[
            "Muebles a medida",
            "Placares",
            "Puertas y ventanas",
            "Restauración de muebles",
        ],
    ),
    (
        7,
        "Herrería",
        &["Rejas", "Portones", "Soldadura", "Estructuras metálicas"],
    ),
    (
        8,
        "Cerrajería",
        &[
            "Apertura de puertas",
            "Cambio de cerraduras",
            "Copias de llaves",
            "Cerraduras de seguridad",
        ],
    ),
    (9, "Jardinería", &["Corte de pasto", "Poda", "Paisajismo", "Riego"]),
    (
        10,
        "Aire acondicionado",
        &[
            "Instalación de splits",
            "Carga de gas refrigerante",
            "Mantenimiento",
            "Calefacción",
        ],
    ),
    (
        11,
        "Techista",
        &["Reparación de techos", "Membranas", "Goteras", "Canaletas"],
    ),
    (
        12,
        "Limpieza",
        &[
            "Limpieza de hogares",
            "Limpieza de oficinas",
            "Limpieza final de obra",
            "Vidrios",
        ],
    ),
    (
        13,
        "Fletes y mudanzas",
        &["Mudanzas", "Fletes", "Traslado de muebles"],
    ),
    (
        14,
        "Reparación de electrodomésticos",
        &["Lavarropas", "Heladeras", "Microondas", "Service técnico"],
    ),
    (15, "Otros oficios", &[]),
];
