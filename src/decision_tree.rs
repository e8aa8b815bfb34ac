//! Decision tree recorded while a search explores the grid
//!
//! Every accepted neighbor becomes a child of the cell it was expanded from. Nodes are
//! keyed by position, so a position owns at most one node per run: when A* finds a cheaper
//! route to a cell that already has a node, that node moves under its new parent.

use crate::collections::FxIndexMap;
use crate::geometry::Position;

use std::fmt;


/// Node in the tree, identified by its index in the node map
/// parent is usize::MAX for the root
#[derive(Clone, Debug)]
struct TreeNode {
    parent: usize,
    children: Vec<usize>,
}

/// Tree of positions rooted at the search start
#[derive(Clone, Debug)]
pub struct DecisionTree {
    nodes: FxIndexMap<Position, TreeNode>,
}

impl DecisionTree {

    pub fn new(root: Position) -> Self {
        let mut nodes = FxIndexMap::default();
        nodes.insert(root, TreeNode { parent: usize::MAX, children: Vec::new() });
        Self { nodes }
    }

    pub fn root(&self) -> Position {
        *self.position_at(0)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root exists from construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.nodes.contains_key(&position)
    }

    /// Positions in the order their nodes were created
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.nodes.keys().copied()
    }

    pub fn parent(&self, position: Position) -> Option<Position> {
        let node = self.nodes.get(&position)?;
        (node.parent != usize::MAX).then(|| *self.position_at(node.parent))
    }

    /// Children in attachment order, empty for unknown positions
    pub fn children(&self, position: Position) -> Vec<Position> {
        self.nodes
            .get(&position)
            .map(|node| node.children.iter().map(|&c| *self.position_at(c)).collect())
            .unwrap_or_default()
    }

    /// Edges between `position` and the root
    pub fn depth(&self, position: Position) -> Option<usize> {
        let mut index = self.nodes.get_index_of(&position)?;
        let mut depth = 0;
        while let Some((_, node)) = self.nodes.get_index(index) {
            if node.parent == usize::MAX {
                break;
            }
            index = node.parent;
            depth += 1;
        }
        Some(depth)
    }

    /// Attach `child` under `parent`
    /// Returns true when a new node was created, false when an existing node was moved
    /// or the parent is unknown
    pub(crate) fn attach(&mut self, parent: Position, child: Position) -> bool {
        let Some(parent_index) = self.nodes.get_index_of(&parent) else {
            return false;
        };

        let child_index = match self.nodes.get_index_of(&child) {
            None => {
                let (index, _) = self.nodes.insert_full(child, TreeNode { parent: parent_index, children: Vec::new() });
                self.nodes[parent_index].children.push(index);
                return true;
            }
            Some(index) => index,
        };

        // never move the root, never hang a node below itself
        if child_index == 0 || self.is_ancestor(child_index, parent_index) {
            return false;
        }

        let old_parent = self.nodes[child_index].parent;
        self.nodes[old_parent].children.retain(|&c| c != child_index);
        self.nodes[parent_index].children.push(child_index);
        self.nodes[child_index].parent = parent_index;
        false
    }

    /// Depth-first, parents before children, children in attachment order
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { tree: self, stack: vec![0] }
    }

    /// Pre-order (prefix, position) pairs laid out with box-drawing guides
    pub fn render(&self) -> Vec<(String, Position)> {
        let mut lines = Vec::with_capacity(self.nodes.len());

        // (node index, indent inherited by its children, branch glyph for the node itself)
        let mut stack: Vec<(usize, String, &str)> = vec![(0, String::new(), "")];
        while let Some((index, indent, branch)) = stack.pop() {
            lines.push((format!("{indent}{branch}"), *self.position_at(index)));

            let child_indent = match branch {
                "" => indent,
                "└── " => format!("{indent}    "),
                _ => format!("{indent}│   "),
            };

            let children = &self.nodes[index].children;
            for (i, &child) in children.iter().enumerate().rev() {
                let glyph = if i + 1 == children.len() { "└── " } else { "├── " };
                stack.push((child, child_indent.clone(), glyph));
            }
        }

        lines
    }

    fn position_at(&self, index: usize) -> &Position {
        // indices only come from the map itself
        self.nodes.get_index(index).map(|(p, _)| p).expect("node index out of range")
    }

    fn is_ancestor(&self, ancestor: usize, mut index: usize) -> bool {
        while index != usize::MAX {
            if index == ancestor {
                return true;
            }
            index = self.nodes[index].parent;
        }
        false
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (prefix, position) in self.render() {
            writeln!(f, "{prefix}{position}")?;
        }
        Ok(())
    }
}


/// Iterator returned by [`DecisionTree::pre_order`]
pub struct PreOrder<'a> {
    tree: &'a DecisionTree,
    stack: Vec<usize>,
}

impl Iterator for PreOrder<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let index = self.stack.pop()?;
        self.stack.extend(self.tree.nodes[index].children.iter().rev());
        Some(*self.tree.position_at(index))
    }
}
