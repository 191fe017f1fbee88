//! Process-wide amino acid table and the site patterns compiled from it.
//!
//! Built once on first use and shared read-only between every document.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AminoAcid {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub code: char,
    /// Canonical grounding (ChEBI, L-form).
    pub identifier: &'static str,
}

pub const AMINO_ACIDS: &[AminoAcid] = &[
    AminoAcid { name: "alanine", abbreviation: "ala", code: 'A', identifier: "CHEBI:16449" },
    AminoAcid { name: "arginine", abbreviation: "arg", code: 'R', identifier: "CHEBI:16467" },
    AminoAcid { name: "asparagine", abbreviation: "asn", code: 'N', identifier: "CHEBI:17196" },
    AminoAcid { name: "aspartic acid", abbreviation: "asp", code: 'D', identifier: "CHEBI:17053" },
    AminoAcid { name: "cysteine", abbreviation: "cys", code: 'C', identifier: "CHEBI:17561" },
    AminoAcid { name: "glutamic acid", abbreviation: "glu", code: 'E', identifier: "CHEBI:16015" },
    AminoAcid { name: "glutamine", abbreviation: "gln", code: 'Q', identifier: "CHEBI:18050" },
    AminoAcid { name: "glycine", abbreviation: "gly", code: 'G', identifier: "CHEBI:15428" },
    AminoAcid { name: "histidine", abbreviation: "his", code: 'H', identifier: "CHEBI:15971" },
    AminoAcid { name: "isoleucine", abbreviation: "ile", code: 'I', identifier: "CHEBI:17191" },
    AminoAcid { name: "leucine", abbreviation: "leu", code: 'L', identifier: "CHEBI:15603" },
    AminoAcid { name: "lysine", abbreviation: "lys", code: 'K', identifier: "CHEBI:18019" },
    AminoAcid { name: "methionine", abbreviation: "met", code: 'M', identifier: "CHEBI:16643" },
    AminoAcid { name: "phenylalanine", abbreviation: "phe", code: 'F', identifier: "CHEBI:17295" },
    AminoAcid { name: "proline", abbreviation: "pro", code: 'P', identifier: "CHEBI:17203" },
    AminoAcid { name: "serine", abbreviation: "ser", code: 'S', identifier: "CHEBI:17115" },
    AminoAcid { name: "threonine", abbreviation: "thr", code: 'T', identifier: "CHEBI:16857" },
    AminoAcid { name: "tryptophan", abbreviation: "trp", code: 'W', identifier: "CHEBI:16828" },
    AminoAcid { name: "tyrosine", abbreviation: "tyr", code: 'Y', identifier: "CHEBI:17895" },
    AminoAcid { name: "valine", abbreviation: "val", code: 'V', identifier: "CHEBI:16414" },
];

/// Alternative full names mapped onto their canonical entry.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("aspartate", "aspartic acid"),
    ("glutamate", "glutamic acid"),
];

pub struct PatternLibrary {
    by_name: HashMap<String, &'static AminoAcid>,
    by_abbreviation: HashMap<&'static str, &'static AminoAcid>,
    by_code: HashMap<char, &'static AminoAcid>,
    pub(crate) name_only: Regex,
    pub(crate) abbreviation_only: Regex,
    pub(crate) name_position: Regex,
    pub(crate) abbreviation_position: Regex,
    pub(crate) code_position: Regex,
}

/// The shared library instance.
pub fn library() -> &'static PatternLibrary {
    static LIBRARY: OnceLock<PatternLibrary> = OnceLock::new();
    LIBRARY.get_or_init(PatternLibrary::build)
}

impl PatternLibrary {
    fn build() -> Self {
        let mut by_name = HashMap::new();
        let mut by_abbreviation = HashMap::new();
        let mut by_code = HashMap::new();

        for aa in AMINO_ACIDS {
            by_name.insert(aa.name.to_string(), aa);
            by_abbreviation.insert(aa.abbreviation, aa);
            by_code.insert(aa.code, aa);
        }
        for (alias, canonical) in NAME_ALIASES {
            if let Some(aa) = AMINO_ACIDS.iter().find(|aa| aa.name == *canonical) {
                by_name.insert(alias.to_string(), aa);
            }
        }

        // Longest first so "aspartic acid" wins over any shorter prefix.
        let names = {
            let mut names: Vec<&String> = by_name.keys().collect();
            names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
            names
                .iter()
                .map(|n| regex::escape(n).replace(' ', r"\s+"))
                .collect::<Vec<_>>()
                .join("|")
        };

        const RESIDUE: &str = r"(?:\s+residues?)?";

        // Patterns are assembled from constants; a failure here is a programming error.
        let compile = |pattern: String| Regex::new(&pattern).expect("site pattern must compile");

        Self {
            name_only: compile(format!(r"(?i)^({names}){RESIDUE}$")),
            abbreviation_only: compile(r"(?i)^([a-z]{3})$".to_string()),
            name_position: compile(format!(r"(?i)^({names}){RESIDUE}[\s-]*([0-9]+)$")),
            abbreviation_position: compile(r"(?i)^([a-z]{3})[\s-]*([0-9]+)$".to_string()),
            code_position: compile(r"^([A-Z])([0-9]+)$".to_string()),
            by_name,
            by_abbreviation,
            by_code,
        }
    }

    /// Look up a full name (or alias), ignoring case and inner whitespace runs.
    pub fn by_name(&self, name: &str) -> Option<&'static AminoAcid> {
        let key = name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        self.by_name.get(&key).copied()
    }

    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&'static AminoAcid> {
        self.by_abbreviation
            .get(abbreviation.to_lowercase().as_str())
            .copied()
    }

    /// One-letter codes are matched upper case only.
    pub fn by_code(&self, code: char) -> Option<&'static AminoAcid> {
        self.by_code.get(&code).copied()
    }

    /// Canonical identifier for a canonical amino acid name.
    pub fn identifier_for(&self, name: &str) -> Option<&'static str> {
        self.by_name(name).map(|aa| aa.identifier)
    }
}
