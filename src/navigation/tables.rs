//! Declarative per-level interaction tables.
//!
//! Which tags drill in, which tags hover, and which tags survive the pick
//! filter are all data here. [`dispatch_click`] and [`hover_eligible`] are the
//! only readers.

use crate::scene::levels::{ScaleLevel, SemanticType};

/// Set of accepted tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    /// Every object in the level's pick-set qualifies.
    Any,
    Only(&'static [SemanticType]),
}

impl TypeFilter {
    pub fn allows(&self, semantic_type: SemanticType) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Only(types) => types.contains(&semantic_type),
        }
    }
}

/// Effect of a qualifying click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Enter the given level anchored at the clicked object.
    Drill(ScaleLevel),
    /// Restart the current level's animation in place.
    Replay,
}

#[derive(Debug, Clone, Copy)]
pub struct LevelRules {
    pub click: TypeFilter,
    pub action: ClickAction,
    pub hover: TypeFilter,
    /// Applied to the declared pick-set when the level is entered.
    pub pick_filter: Option<&'static [SemanticType]>,
}

const CELL_ORGANELLES: &[SemanticType] = &[
    SemanticType::Mitochondria,
    SemanticType::EndoplasmicReticulum,
    SemanticType::GolgiApparatus,
    SemanticType::Lysosome,
    SemanticType::Ribosome,
    SemanticType::Peroxisome,
    SemanticType::Vesicle,
    SemanticType::Cytoskeleton,
    SemanticType::CellMembrane,
];

const NUCLEAR_STRUCTURES: &[SemanticType] = &[
    SemanticType::ChromatinTerritory,
    SemanticType::Nucleolus,
    SemanticType::NuclearPore,
    SemanticType::NuclearMembrane,
];

const NUCLEOSOME_SITES: &[SemanticType] = &[SemanticType::Histone, SemanticType::TranscriptionComplex];

const DNA_PARTS: &[SemanticType] = &[SemanticType::DnaComponent];

const TRANSCRIPTION_PARTS: &[SemanticType] = &[
    SemanticType::TranscriptionEnzyme,
    SemanticType::TranscriptionProduct,
];

static CELL: LevelRules = LevelRules {
    click: TypeFilter::Only(CELL_ORGANELLES),
    action: ClickAction::Drill(ScaleLevel::Nucleus),
    hover: TypeFilter::Only(CELL_ORGANELLES),
    pick_filter: None,
};

static NUCLEUS: LevelRules = LevelRules {
    click: TypeFilter::Only(NUCLEAR_STRUCTURES),
    action: ClickAction::Drill(ScaleLevel::Chromosome),
    hover: TypeFilter::Only(NUCLEAR_STRUCTURES),
    pick_filter: None,
};

// Chromosome and ChromatinFiber drill on anything they declare.
static CHROMOSOME: LevelRules = LevelRules {
    click: TypeFilter::Any,
    action: ClickAction::Drill(ScaleLevel::ChromatinFiber),
    hover: TypeFilter::Any,
    pick_filter: None,
};

static CHROMATIN_FIBER: LevelRules = LevelRules {
    click: TypeFilter::Any,
    action: ClickAction::Drill(ScaleLevel::Chromatin),
    hover: TypeFilter::Any,
    pick_filter: None,
};

static CHROMATIN: LevelRules = LevelRules {
    click: TypeFilter::Only(NUCLEOSOME_SITES),
    action: ClickAction::Drill(ScaleLevel::Dna),
    hover: TypeFilter::Only(NUCLEOSOME_SITES),
    pick_filter: Some(NUCLEOSOME_SITES),
};

static DNA: LevelRules = LevelRules {
    click: TypeFilter::Only(DNA_PARTS),
    action: ClickAction::Drill(ScaleLevel::Transcription),
    hover: TypeFilter::Only(DNA_PARTS),
    pick_filter: None,
};

static TRANSCRIPTION: LevelRules = LevelRules {
    click: TypeFilter::Only(TRANSCRIPTION_PARTS),
    action: ClickAction::Replay,
    hover: TypeFilter::Only(TRANSCRIPTION_PARTS),
    pick_filter: None,
};

/// Interaction rules for a level.
pub fn rules(level: ScaleLevel) -> &'static LevelRules {
    match level {
        ScaleLevel::Cell => &CELL,
        ScaleLevel::Nucleus => &NUCLEUS,
        ScaleLevel::Chromosome => &CHROMOSOME,
        ScaleLevel::ChromatinFiber => &CHROMATIN_FIBER,
        ScaleLevel::Chromatin => &CHROMATIN,
        ScaleLevel::Dna => &DNA,
        ScaleLevel::Transcription => &TRANSCRIPTION,
    }
}

/// What a click on `semantic_type` does while `level` is current.
pub fn dispatch_click(level: ScaleLevel, semantic_type: SemanticType) -> Option<ClickAction> {
    let rules = rules(level);
    if rules.click.allows(semantic_type) {
        Some(rules.action)
    } else {
        None
    }
}

pub fn hover_eligible(level: ScaleLevel, semantic_type: SemanticType) -> bool {
    rules(level).hover.allows(semantic_type)
}

/// Whether a declared object survives the level's pick filter.
pub fn passes_pick_filter(level: ScaleLevel, semantic_type: SemanticType) -> bool {
    rules(level)
        .pick_filter
        .map_or(true, |types| types.contains(&semantic_type))
}

/// Hint appended to hover labels.
pub fn call_to_action(semantic_type: SemanticType) -> Option<&'static str> {
    match semantic_type {
        SemanticType::TranscriptionComplex => Some("(Click to see transcription animation)"),
        SemanticType::Histone => Some("(Click to see DNA structure)"),
        _ => None,
    }
}
