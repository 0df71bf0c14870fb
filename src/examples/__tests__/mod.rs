
use crate::ASTNode;

/// Check the span invariants for a parsed tree: the text is the consumed slice, children stay
/// inside their parent, and siblings appear in non-decreasing offset order.
pub fn assert_tree_spans(tree: &ASTNode, input: &str) {
    assert_eq!(tree.text, &input[tree.start..tree.end]);
    assert!(tree.start <= tree.end);

    let mut previous_start = tree.start;
    for child in &tree.children {
        assert!(child.start >= previous_start);
        assert!(child.start >= tree.start);
        assert!(child.end <= tree.end);
        previous_start = child.start;
        assert_tree_spans(child, input);
    }
}
