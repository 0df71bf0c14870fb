use crate::{ASTNode, SuccessData};

impl<'c> SuccessData<'c> {
    pub fn new(consumed_index: usize, children: Vec<ASTNode<'c>>) -> Self {
        Self {
            consumed_index,
            children,
        }
    }
    pub fn hidden(consumed_index: usize) -> Self {
        Self {
            consumed_index,
            children: Vec::with_capacity(0),
        }
    }
    pub fn tree(consumed_index: usize, tree: ASTNode<'c>) -> Self {
        Self {
            consumed_index,
            children: vec![tree],
        }
    }
}
