//! Object class hierarchy used to rank classes by specificity

mod node;
mod taxonomy;

pub use node::{CategoryNode, PreOrderIter};
pub use taxonomy::TaxonomyNode;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::HierarchyError;
use crate::tables::Blacklist;
use crate::Result;

/// How a queried class name is matched against node labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMatch {
    /// Node label occurs anywhere inside the class name. Compatible with the
    /// Open Images label set, but "bag" also matches "luggage and bags".
    #[default]
    Substring,
    /// Node label equals the class name
    Exact,
}

impl LabelMatch {
    pub fn matches(&self, label: &str, class_name: &str) -> bool {
        match self {
            LabelMatch::Substring => class_name.contains(label),
            LabelMatch::Exact => class_name == label,
        }
    }
}

/// Immutable category tree. The root comes from the top-level description
/// entry and is never returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryHierarchy {
    root: CategoryNode,
    match_mode: LabelMatch,
}

impl CategoryHierarchy {
    /// Build with the default substring matching
    pub fn build(taxonomy: &TaxonomyNode, blacklist: &Blacklist) -> Result<Self> {
        Self::build_with_match(taxonomy, blacklist, LabelMatch::default())
    }

    pub fn build_with_match(
        taxonomy: &TaxonomyNode,
        blacklist: &Blacklist,
        match_mode: LabelMatch,
    ) -> Result<Self> {
        let mut pruned = 0;
        let root = build_node(taxonomy, blacklist, &mut pruned)?;
        let hierarchy = Self { root, match_mode };

        debug!(
            nodes = hierarchy.len(),
            pruned_subtrees = pruned,
            height = hierarchy.root.height(),
            "built category hierarchy"
        );

        Ok(hierarchy)
    }

    pub fn root(&self) -> &CategoryNode {
        &self.root
    }

    pub fn match_mode(&self) -> LabelMatch {
        self.match_mode
    }

    /// Pre-order walk over every node except the root
    pub fn iter(&self) -> impl Iterator<Item = &CategoryNode> {
        self.root.iter().skip(1)
    }

    /// Number of nodes, excluding the root
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Whether some node carries exactly this label
    pub fn contains(&self, label: &str) -> bool {
        self.iter().any(|node| node.label() == label)
    }

    /// First node in pre-order whose label matches the class name
    pub fn find(&self, class_name: &str) -> Option<&CategoryNode> {
        let mut matches = self
            .iter()
            .filter(|node| self.match_mode.matches(node.label(), class_name));

        let first = matches.next()?;
        if let Some(other) = matches.next() {
            warn!(
                class_name,
                chosen = first.label(),
                also_matched = other.label(),
                "ambiguous category lookup"
            );
        }

        Some(first)
    }

    /// Height of the node matching the class name
    pub fn height_of(&self, class_name: &str) -> Result<usize> {
        self.find(class_name)
            .map(CategoryNode::height)
            .ok_or_else(|| HierarchyError::UnknownCategory(class_name.to_string()))
    }
}

// Children are filtered against the blacklist before recursing, so nothing
// below a blacklisted label is ever materialized.
fn build_node(
    description: &TaxonomyNode,
    blacklist: &Blacklist,
    pruned: &mut usize,
) -> Result<CategoryNode> {
    if description.label.trim().is_empty() {
        return Err(HierarchyError::MalformedTaxonomy(
            "category with empty label".to_string(),
        ));
    }

    let mut children = Vec::with_capacity(description.subcategory.len());
    for child in &description.subcategory {
        if blacklist.contains(&child.label) {
            *pruned += 1;
            continue;
        }
        children.push(build_node(child, blacklist, pruned)?);
    }

    Ok(CategoryNode::new(description.label.clone(), children))
}
