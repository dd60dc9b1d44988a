//! Catalog of component descriptions for the detail window.
//!
//! The catalog ships embedded as `component_details.ron`, keyed by semantic
//! tag. Types without an entry fall back to their title alone.

use std::collections::HashMap;

use serde::Deserialize;

use crate::interaction::DetailRequest;
use crate::scene::levels::SemanticType;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetailSection {
    pub heading: String,
    /// `(term, explanation)` bullets.
    pub items: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentDetail {
    pub title: String,
    pub sections: Vec<DetailSection>,
}

/// Resolved content of one detail window.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    /// Name of the clicked instance, e.g. "Mitochondria 3".
    pub subject: String,
    pub sections: Vec<DetailSection>,
}

#[derive(Debug, Default)]
pub struct DetailCatalog {
    entries: HashMap<SemanticType, ComponentDetail>,
}

impl DetailCatalog {
    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        let entries = ron::from_str(text)?;
        Ok(Self { entries })
    }

    /// Catalog compiled into the binary. Empty if it fails to parse.
    pub fn embedded() -> Self {
        match Self::parse(include_str!("../../component_details.ron")) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to parse embedded component details: {}", e);
                Self::default()
            }
        }
    }

    pub fn get(&self, semantic_type: SemanticType) -> Option<&ComponentDetail> {
        self.entries.get(&semantic_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, request: &DetailRequest) -> DetailView {
        match self.get(request.semantic_type) {
            Some(detail) => DetailView {
                title: detail.title.clone(),
                subject: request.display_name.clone(),
                sections: detail.sections.clone(),
            },
            None => DetailView {
                title: request.semantic_type.title().to_string(),
                subject: request.display_name.clone(),
                sections: Vec::new(),
            },
        }
    }
}
