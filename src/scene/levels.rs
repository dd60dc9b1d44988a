//! Scale levels and the semantic vocabulary of interactive objects.
//!
//! The explorer moves through a fixed ordered chain of structural scales.
//! Every pickable object in a level carries one [`SemanticType`] tag drawn from
//! a closed vocabulary; the navigation tables are keyed on these tags.

use serde::{Deserialize, Serialize};

/// One of the seven mutually exclusive navigation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ScaleLevel {
    /// Whole cell with organelles. Root of the chain.
    #[default]
    Cell,
    /// Nucleus with nucleolus, pores and chromatin territories.
    Nucleus,
    /// Metaphase chromosome built from chromatin domains.
    Chromosome,
    /// 30nm solenoid fiber of nucleosome clusters.
    ChromatinFiber,
    /// Beads-on-a-string nucleosome chain.
    Chromatin,
    /// Double helix with individually pickable nucleotide parts.
    Dna,
    /// Active transcription bubble, branches off Chromatin.
    Transcription,
}

impl ScaleLevel {
    /// All levels in chain order.
    pub fn all() -> &'static [ScaleLevel] {
        &[
            ScaleLevel::Cell,
            ScaleLevel::Nucleus,
            ScaleLevel::Chromosome,
            ScaleLevel::ChromatinFiber,
            ScaleLevel::Chromatin,
            ScaleLevel::Dna,
            ScaleLevel::Transcription,
        ]
    }

    /// Dense index, stable across the session.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Level that zoom-out returns to. `None` for the root.
    ///
    /// Transcription hangs off Chromatin rather than Dna.
    pub fn parent(self) -> Option<ScaleLevel> {
        match self {
            ScaleLevel::Cell => None,
            ScaleLevel::Nucleus => Some(ScaleLevel::Cell),
            ScaleLevel::Chromosome => Some(ScaleLevel::Nucleus),
            ScaleLevel::ChromatinFiber => Some(ScaleLevel::Chromosome),
            ScaleLevel::Chromatin => Some(ScaleLevel::ChromatinFiber),
            ScaleLevel::Dna => Some(ScaleLevel::Chromatin),
            ScaleLevel::Transcription => Some(ScaleLevel::Chromatin),
        }
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ScaleLevel::Cell => "Cell",
            ScaleLevel::Nucleus => "Nucleus",
            ScaleLevel::Chromosome => "Chromosome",
            ScaleLevel::ChromatinFiber => "Chromatin Fiber",
            ScaleLevel::Chromatin => "Nucleosomes",
            ScaleLevel::Dna => "DNA",
            ScaleLevel::Transcription => "Transcription",
        }
    }
}

impl std::fmt::Display for ScaleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Closed vocabulary of interactive object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    CellMembrane,
    Cytoplasm,
    Mitochondria,
    EndoplasmicReticulum,
    GolgiApparatus,
    Lysosome,
    Ribosome,
    Peroxisome,
    Vesicle,
    Cytoskeleton,
    NuclearMembrane,
    Nucleoplasm,
    Nucleolus,
    NuclearPore,
    ChromatinTerritory,
    ChromosomeDomain,
    FiberCluster,
    Histone,
    TranscriptionComplex,
    DnaComponent,
    TranscriptionEnzyme,
    TranscriptionProduct,
}

impl SemanticType {
    /// Snake-case tag, as reported to the detail view.
    pub fn tag(&self) -> &'static str {
        match self {
            SemanticType::CellMembrane => "cell_membrane",
            SemanticType::Cytoplasm => "cytoplasm",
            SemanticType::Mitochondria => "mitochondria",
            SemanticType::EndoplasmicReticulum => "endoplasmic_reticulum",
            SemanticType::GolgiApparatus => "golgi_apparatus",
            SemanticType::Lysosome => "lysosome",
            SemanticType::Ribosome => "ribosome",
            SemanticType::Peroxisome => "peroxisome",
            SemanticType::Vesicle => "vesicle",
            SemanticType::Cytoskeleton => "cytoskeleton",
            SemanticType::NuclearMembrane => "nuclear_membrane",
            SemanticType::Nucleoplasm => "nucleoplasm",
            SemanticType::Nucleolus => "nucleolus",
            SemanticType::NuclearPore => "nuclear_pore",
            SemanticType::ChromatinTerritory => "chromatin_territory",
            SemanticType::ChromosomeDomain => "chromosome_domain",
            SemanticType::FiberCluster => "fiber_cluster",
            SemanticType::Histone => "histone",
            SemanticType::TranscriptionComplex => "transcription_complex",
            SemanticType::DnaComponent => "dna_component",
            SemanticType::TranscriptionEnzyme => "transcription_enzyme",
            SemanticType::TranscriptionProduct => "transcription_product",
        }
    }

    /// Heading shown by the detail window.
    pub fn title(&self) -> &'static str {
        match self {
            SemanticType::CellMembrane => "Cell Membrane",
            SemanticType::Cytoplasm => "Cytoplasm",
            SemanticType::Mitochondria => "Mitochondria",
            SemanticType::EndoplasmicReticulum => "Endoplasmic Reticulum",
            SemanticType::GolgiApparatus => "Golgi Apparatus",
            SemanticType::Lysosome => "Lysosome",
            SemanticType::Ribosome => "Ribosome",
            SemanticType::Peroxisome => "Peroxisome",
            SemanticType::Vesicle => "Vesicle",
            SemanticType::Cytoskeleton => "Cytoskeleton",
            SemanticType::NuclearMembrane => "Nuclear Membrane",
            SemanticType::Nucleoplasm => "Nucleoplasm",
            SemanticType::Nucleolus => "Nucleolus",
            SemanticType::NuclearPore => "Nuclear Pore",
            SemanticType::ChromatinTerritory => "Chromatin Territory",
            SemanticType::ChromosomeDomain => "Chromosome Domain",
            SemanticType::FiberCluster => "Nucleosome Cluster",
            SemanticType::Histone => "Histone Protein Complex",
            SemanticType::TranscriptionComplex => "Transcription Complex",
            SemanticType::DnaComponent => "DNA Component",
            SemanticType::TranscriptionEnzyme => "RNA Polymerase",
            SemanticType::TranscriptionProduct => "RNA Strand",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
