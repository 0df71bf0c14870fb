use crate::ASTNode;
use ptree::TreeItem;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

impl<'c> Display for ASTNode<'c> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let children: Vec<String> = self.children.iter().map(|child| format!("{}", child)).collect();
        f.debug_struct("")
            .field("value", &(&self.name, &self.start, &self.end))
            .field("children", &children)
            .finish()
    }
}
impl<'c> Debug for ASTNode<'c> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug_struct = f.debug_struct("ASTNode");
        debug_struct
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end);
        if self.children.len() > 0 {
            debug_struct.field("children", &self.children);
        }
        debug_struct.finish()
    }
}

impl<'c> ASTNode<'c> {
    /// Create new AST node.
    pub fn new(
        name: Rc<str>,
        start: usize,
        end: usize,
        text: &'c str,
        children: Vec<ASTNode<'c>>,
    ) -> Self {
        Self {
            name,
            start,
            end,
            text,
            children,
        }
    }
    /// Create AST leaf node
    pub fn leaf(name: Rc<str>, start: usize, end: usize, text: &'c str) -> Self {
        ASTNode::new(name, start, end, text, Vec::with_capacity(0))
    }

    /// Find a AST child node for a given name searching through all nested children
    pub fn find_tree_with_name(&self, name: &str) -> Option<&ASTNode<'c>> {
        if self.name.as_ref() == name {
            Some(self)
        } else {
            self.children
                .iter()
                .find_map(|child| child.find_tree_with_name(name))
        }
    }

    /// Search through all nested children and return the first match AST child node
    pub fn find_tree<TF: Fn(&ASTNode<'c>) -> bool>(&self, p: &TF) -> Option<&ASTNode<'c>> {
        if p(self) {
            Some(self)
        } else {
            self.children.iter().find_map(|child| child.find_tree(p))
        }
    }

    /// Return all the match children node for a given node name
    pub fn list_tree_with_name<'this>(&'this self, name: &str) -> Vec<&'this ASTNode<'c>> {
        let mut list_tree: Vec<&'this ASTNode<'c>> = Vec::new();
        self.walk_tree(&mut list_tree, &|tree, list| {
            if tree.name.as_ref() == name {
                list.push(tree);
            }
        });
        list_tree
    }

    pub fn get_child(&self, name: &str) -> Option<&ASTNode<'c>> {
        self.children.iter().find(|child| child.name.as_ref() == name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.name.as_ref() == name || self.children.iter().any(|child| child.contains(name))
    }

    fn walk_tree<'this, TR, TF: Fn(&'this Self, &mut TR)>(&'this self, r: &mut TR, p: &TF) {
        p(self, r);
        self.children.iter().for_each(|child| child.walk_tree(r, p));
    }

    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}

impl<'c> TreeItem for ASTNode<'c> {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{} # {}-{}", self.name, self.start, self.end)
    }

    fn children(&self) -> std::borrow::Cow<[Self::Child]> {
        std::borrow::Cow::from(&self.children)
    }
}
