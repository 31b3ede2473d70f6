use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{Side, SnailfishNumber, Slot};

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for SnailfishNumber {
    /// Each pair is labelled with its literal, regular numbers with their value.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(number: &SnailfishNumber, idx: Index, parent_tree: &mut Tree<String>) {
            if let Ok(node) = number.node(idx) {
                for side in Side::BOTH {
                    match node.slot(side) {
                        Slot::Regular(value) => {
                            parent_tree.push(Tree::new(value.to_string()));
                        }
                        Slot::Pair(child) => {
                            let mut child_tree = Tree::new(number.pair_label(child));
                            build_tree(number, child, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }
        }

        let root = self.root();
        let mut tree = Tree::new(self.pair_label(root));
        build_tree(self, root, &mut tree);
        tree
    }
}

impl SnailfishNumber {
    fn pair_label(&self, idx: Index) -> String {
        self.subtree_literal(idx).to_string()
    }
}
