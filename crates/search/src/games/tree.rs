//! Hand-built game trees.
//!
//! A [`GameTree`] is a game whose states are the nodes of an explicit tree,
//! each carrying a fixed static value. It makes hand-checked scenarios (pruning
//! opportunities, ties, dead ends) easy to write down.

use gametree_core::Rules;

/// A node of a [`GameTree`]; this is the game's state type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order (the root is 0).
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct TreeNode {
    value: f64,
    children: Vec<NodeId>,
    terminal: bool,
}

/// An explicit game tree with a static value on every node.
///
/// Values are returned unchanged by [`Rules::heuristic`], so they are read as
/// mover-relative scores. A node is terminal only when marked so; a node
/// without children is otherwise a non-terminal dead end.
#[derive(Clone, Debug)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
}

impl GameTree {
    /// The root node.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a tree holding only a root with the given value.
    pub fn new(root_value: f64) -> Self {
        Self {
            nodes: vec![TreeNode {
                value: root_value,
                children: Vec::new(),
                terminal: false,
            }],
        }
    }

    /// Append a child to `parent`, returning its id.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, value: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(TreeNode {
            value,
            children: Vec::new(),
            terminal: false,
        });
        id
    }

    /// Mark a node as game-ending.
    pub fn mark_terminal(&mut self, node: NodeId) {
        self.nodes[node.0].terminal = true;
    }

    /// Static value of a node.
    pub fn value(&self, node: NodeId) -> f64 {
        self.nodes[node.0].value
    }

    /// Children of a node, in insertion order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest number of children of any node.
    pub fn max_branching(&self) -> usize {
        self.nodes.iter().map(|n| n.children.len()).max().unwrap_or(0)
    }
}

impl Rules for GameTree {
    type State = NodeId;

    fn initial_state(&self) -> Self::State {
        Self::ROOT
    }

    fn successors(&self, state: &Self::State) -> Vec<Self::State> {
        self.children(*state).to_vec()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        self.nodes[state.0].terminal
    }

    fn heuristic(&self, state: &Self::State) -> f64 {
        self.value(*state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree() {
        let mut tree = GameTree::new(1.0);
        let a = tree.add_child(GameTree::ROOT, 2.0);
        let b = tree.add_child(GameTree::ROOT, 3.0);
        let c = tree.add_child(a, 4.0);

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.children(GameTree::ROOT), &[a, b]);
        assert_eq!(tree.children(a), &[c]);
        assert_eq!(tree.value(c), 4.0);
        assert_eq!(tree.max_branching(), 2);
    }

    #[test]
    fn test_rules() {
        let mut tree = GameTree::new(1.0);
        let a = tree.add_child(GameTree::ROOT, -2.0);
        tree.mark_terminal(a);

        assert_eq!(tree.initial_state(), GameTree::ROOT);
        assert_eq!(tree.successors(&GameTree::ROOT), vec![a]);
        assert!(tree.successors(&a).is_empty());
        assert!(tree.is_terminal(&a));
        assert!(!tree.is_terminal(&GameTree::ROOT));
        assert_eq!(tree.heuristic(&a), -2.0);
    }
}
