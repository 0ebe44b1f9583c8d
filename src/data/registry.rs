//! Dataset Registry Module
//! Fixed lookup tables for pathogens, dataset types and cutoffs.

use std::fmt;

/// Organism name (lowercase) to the code used in remote file names.
pub const PATHOGENS: &[(&str, &str)] = &[
    ("acinetobacter baumannii", "abaumannii"),
    ("campylobacter spp.", "campylobacter"),
    ("enterococcus faecium", "efaecium"),
    ("enterobacter spp.", "enterobacter"),
    ("escherichia coli", "ecoli"),
    ("helicobacter pylori", "hpylori"),
    ("klebsiella pneumoniae", "kpneumoniae"),
    ("mycobacterium tuberculosis", "mtuberculosis"),
    ("neisseria gonorrhoeae", "ngonorrhoeae"),
    ("plasmodium spp.", "pfalciparum"),
    ("pseudomonas aeruginosa", "paeruginosa"),
    ("schistosoma mansoni", "smansoni"),
    ("staphylococcus aureus", "saureus"),
    ("streptococcus pneumoniae", "spneumoniae"),
];

/// Resolve a pathogen name or code to its code.
///
/// Accepts either an organism name or a code that is already in the table.
/// Matching is case-insensitive.
pub fn resolve_pathogen(input: &str) -> Option<&'static str> {
    let needle = input.to_lowercase();

    if let Some((_, code)) = PATHOGENS.iter().find(|(name, _)| *name == needle) {
        return Some(*code);
    }

    PATHOGENS
        .iter()
        .find(|(_, code)| *code == needle)
        .map(|(_, code)| *code)
}

/// All organism names in table order.
pub fn pathogen_names() -> impl Iterator<Item = &'static str> {
    PATHOGENS.iter().map(|(name, _)| *name)
}

/// All pathogen codes in table order.
pub fn pathogen_codes() -> impl Iterator<Item = &'static str> {
    PATHOGENS.iter().map(|(_, code)| *code)
}

/// Category of measurement stored in a dataset variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatasetType {
    /// Organism-level labels
    #[default]
    Organism,
    /// Minimum inhibitory concentration values
    Mic,
    /// Activity values
    Activity,
    /// Everything combined
    All,
}

impl DatasetType {
    pub const ALL: [DatasetType; 4] = [
        DatasetType::Organism,
        DatasetType::Mic,
        DatasetType::Activity,
        DatasetType::All,
    ];

    /// Human-facing label accepted as input.
    pub fn label(self) -> &'static str {
        match self {
            DatasetType::Organism => "organism",
            DatasetType::Mic => "mic",
            DatasetType::Activity => "activity",
            DatasetType::All => "all",
        }
    }

    /// Token used in remote file names.
    pub fn token(self) -> &'static str {
        match self {
            DatasetType::Organism => "org_all",
            DatasetType::Mic => "MIC",
            DatasetType::Activity => "Activity",
            DatasetType::All => "all",
        }
    }

    /// Parse a label, case-insensitively. File-name tokens are not labels.
    pub fn from_label(input: &str) -> Option<Self> {
        let needle = input.to_lowercase();
        Self::ALL.into_iter().find(|t| t.label() == needle)
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Threshold variant of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cutoff {
    Low,
    #[default]
    High,
}

impl Cutoff {
    pub const ALL: [Cutoff; 2] = [Cutoff::Low, Cutoff::High];

    pub fn token(self) -> &'static str {
        match self {
            Cutoff::Low => "lc",
            Cutoff::High => "hc",
        }
    }

    pub fn from_token(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "lc" => Some(Cutoff::Low),
            "hc" => Some(Cutoff::High),
            _ => None,
        }
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
