// src/feed/universe.rs
//! # Company Universe
//! Static catalog of the listed BVMT companies: symbol, French and Arabic
//! display names, sector. Also the symbol-extraction helper used to tag
//! free text with mentioned companies.

use serde::Serialize;

/// One listed company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub symbol: &'static str,
    pub name_fr: &'static str,
    pub name_ar: &'static str,
    pub sector: &'static str,
}

pub const UNIVERSE: &[Company] = &[
    Company {
        symbol: "ATB",
        name_fr: "Arab Tunisian Bank",
        name_ar: "البنك العربي التونسي",
        sector: "bancaire",
    },
    Company {
        symbol: "TUNTEL",
        name_fr: "Tunisie Telecom",
        name_ar: "تونسيّة للإتصالات",
        sector: "télécommunications",
    },
    Company {
        symbol: "BH",
        name_fr: "Banque de l'Habitat",
        name_ar: "البنك العقاري",
        sector: "bancaire",
    },
    Company {
        symbol: "STB",
        name_fr: "Société Tunisienne de Banque",
        name_ar: "البنك التونسي",
        sector: "bancaire",
    },
    Company {
        symbol: "AB",
        name_fr: "Amen Bank",
        name_ar: "بنك آمن",
        sector: "bancaire",
    },
    Company {
        symbol: "ADWYA",
        name_fr: "Adwya Assurances",
        name_ar: "أضواء للتأمين",
        sector: "assurances",
    },
    Company {
        symbol: "AMS",
        name_fr: "Assurances Maghrébines",
        name_ar: "التأمينات المغاربية",
        sector: "assurances",
    },
    Company {
        symbol: "CELL",
        name_fr: "Cellulose",
        name_ar: "السللوز",
        sector: "industrie",
    },
    Company {
        symbol: "SIPHAT",
        name_fr: "Société Industrielle Pharmaceutique",
        name_ar: "الصناعات الدوائية",
        sector: "pharmaceutique",
    },
    Company {
        symbol: "UIB",
        name_fr: "Union Internationale de Banques",
        name_ar: "الاتحاد الدولي للبنوك",
        sector: "bancaire",
    },
];

/// All listed symbols, catalog order.
pub fn symbols() -> Vec<&'static str> {
    UNIVERSE.iter().map(|c| c.symbol).collect()
}

/// Case-insensitive symbol lookup.
pub fn find(symbol: &str) -> Option<&'static Company> {
    UNIVERSE
        .iter()
        .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
}

/// Extract mentioned companies from free text by symbol or display name.
/// De-duplicated, discovery order (catalog order within each pass).
pub fn extract_symbols(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut mentioned: Vec<String> = Vec::new();

    for c in UNIVERSE {
        if text_lower.contains(&c.symbol.to_lowercase()) {
            mentioned.push(c.symbol.to_string());
        }
    }
    for c in UNIVERSE {
        let already = mentioned.iter().any(|s| s == c.symbol);
        if already {
            continue;
        }
        if text_lower.contains(&c.name_fr.to_lowercase()) || text.contains(c.name_ar) {
            mentioned.push(c.symbol.to_string());
        }
    }
    mentioned
}
