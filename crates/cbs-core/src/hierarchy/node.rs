use serde::Serialize;

/// A category in the hierarchy. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    label: String,
    children: Vec<CategoryNode>,
    height: usize,
}

impl CategoryNode {
    /// Create a node over already-built children; height is derived from them.
    pub fn new(label: String, children: Vec<CategoryNode>) -> Self {
        let height = children
            .iter()
            .map(|child| child.height + 1)
            .max()
            .unwrap_or(0);

        Self {
            label,
            children,
            height,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[CategoryNode] {
        &self.children
    }

    /// Distance to the furthest leaf below this node; leaves are 0.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Height recomputed from scratch, ignoring cached values below this node
    pub fn recompute_height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.recompute_height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order walk over this node and all of its descendants
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![self] }
    }
}

/// Parent-before-children traversal, children in description order
pub struct PreOrderIter<'a> {
    stack: Vec<&'a CategoryNode>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a CategoryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
