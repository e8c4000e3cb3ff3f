//! Fixed product catalog offered by the form

/// Catalog models, in display order
pub const MODELS: [&str; 3] = [
    "Series 11 Ultra (49mm)",
    "Series 11 Pro (47mm)",
    "S11 Pro Mini (42mm)",
];

/// Model value meaning "type the model name yourself"
pub const OTHER_MODEL: &str = "outro";

/// Available colors
pub const COLORS: [&str; 3] = ["Preto", "Prata", "Dourado"];

/// Accessories, in catalog order
pub const ACCESSORIES: [&str; 5] = [
    "Caixa original",
    "Cabo carregador",
    "Manual",
    "Pulseira Padrão",
    "+Brindes promoção (atual)",
];

/// Accessories checked on a new quote
pub fn default_accessories() -> Vec<String> {
    ACCESSORIES[..4].iter().map(|a| a.to_string()).collect()
}

/// Position of an accessory in the catalog
pub fn accessory_position(accessory: &str) -> Option<usize> {
    ACCESSORIES.iter().position(|a| *a == accessory)
}
