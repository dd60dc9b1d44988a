//! Hover label text.

use crate::navigation::tables::call_to_action;
use crate::scene::graph::{NodeId, ObjectInfo, SceneSubtree};

/// Elements making up a nucleotide part, keyed by display name.
pub fn atom_composition(name: &str) -> Option<&'static str> {
    match name {
        "Adenine" => Some("C, H, N"),
        "Guanine" | "Cytosine" | "Thymine" => Some("C, H, N, O"),
        "Deoxyribose Sugar" => Some("C, H, O"),
        "Phosphate Group" => Some("P, O"),
        _ => None,
    }
}

/// Label for an ordinary object: its name, plus a hint line for some types.
pub fn object_label(info: &ObjectInfo) -> String {
    match call_to_action(info.semantic_type) {
        Some(hint) => format!("{}\n{}", info.display_name, hint),
        None => info.display_name.clone(),
    }
}

/// Label for a hovered nucleotide part, listing the other parts of its group.
pub fn nucleotide_label(subtree: &SceneSubtree, hovered: NodeId, group: &[NodeId]) -> String {
    let name = subtree
        .info(hovered)
        .map_or("", |info| info.display_name.as_str());
    let atoms = atom_composition(name).unwrap_or("?");

    let mut text = format!("HOVERING:  {}\n(Atoms: {})\n\n--- SAME NUCLEOTIDE ---", name, atoms);
    for &part in group {
        if part == hovered {
            continue;
        }
        if let Some(info) = subtree.info(part).filter(|info| !info.bond) {
            text.push_str("\n ");
            text.push_str(&info.display_name);
        }
    }
    text.push_str("\n\n(Click to see transcription animation)");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::{rgb, SceneNode, Shape, Transform};
    use crate::scene::levels::SemanticType;

    fn part(subtree: &mut SceneSubtree, name: &str) -> NodeId {
        subtree.add(
            SceneNode::new(Shape::Sphere { radius: 1.0 }, Transform::IDENTITY, rgb(0, 1.0))
                .with_info(ObjectInfo::new(name, SemanticType::DnaComponent).with_correlation(4)),
        )
    }

    #[test]
    fn test_nucleotide_label_lists_other_parts() {
        let mut subtree = SceneSubtree::new();
        let sugar = part(&mut subtree, "Deoxyribose Sugar");
        let base = part(&mut subtree, "Guanine");
        let phosphate = part(&mut subtree, "Phosphate Group");

        let text = nucleotide_label(&subtree, base, &[sugar, base, phosphate]);
        assert_eq!(
            text,
            "HOVERING:  Guanine\n(Atoms: C, H, N, O)\n\n--- SAME NUCLEOTIDE ---\n Deoxyribose Sugar\n Phosphate Group\n\n(Click to see transcription animation)"
        );
    }

    #[test]
    fn test_unknown_part_composition() {
        let mut subtree = SceneSubtree::new();
        let odd = part(&mut subtree, "Uracil");
        assert!(nucleotide_label(&subtree, odd, &[odd]).starts_with("HOVERING:  Uracil\n(Atoms: ?)"));
    }

    #[test]
    fn test_object_label_hints() {
        let complex = ObjectInfo::new("RNA Polymerase", SemanticType::TranscriptionComplex);
        assert_eq!(
            object_label(&complex),
            "RNA Polymerase\n(Click to see transcription animation)"
        );
        let histone = ObjectInfo::new("Histone Protein Complex", SemanticType::Histone);
        assert_eq!(
            object_label(&histone),
            "Histone Protein Complex\n(Click to see DNA structure)"
        );
        let pore = ObjectInfo::new("Nuclear Pore 3", SemanticType::NuclearPore);
        assert_eq!(object_label(&pore), "Nuclear Pore 3");
    }
}
