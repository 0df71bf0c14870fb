use super::{ElementKind, GrammarElement};
use crate::{ElementId, ImplementationError};
use std::rc::Rc;

/// Validate every production for left recursion.
///
/// The walk follows only the edges reachable without consuming input: the content of a node or
/// repetition, every alternative of a union, and the members of a concatenation up to and
/// including its first non-optional member. Re-entering an element which is still on the descent
/// path means the grammar can recurse without advancing.
pub(crate) fn validate(
    elements: &[GrammarElement],
    roots: impl Iterator<Item = ElementId>,
) -> Result<(), ImplementationError> {
    let mut validator = Validator {
        on_path: vec![false; elements.len()],
        validated: vec![false; elements.len()],
        name_stack: Vec::new(),
    };
    for root in roots {
        validator.visit(elements, root.0)?;
    }
    Ok(())
}

struct Validator {
    on_path: Vec<bool>,
    validated: Vec<bool>,
    name_stack: Vec<Rc<str>>,
}

impl Validator {
    fn visit(&mut self, elements: &[GrammarElement], id: usize) -> Result<(), ImplementationError> {
        if self.validated[id] {
            return Ok(());
        }
        if self.on_path[id] {
            let name = match &elements[id].kind {
                ElementKind::Node { name, .. } => name.clone(),
                _ => match self.name_stack.last() {
                    Some(name) => name.clone(),
                    None => Rc::from(""),
                },
            };
            return Err(ImplementationError::new(
                "LeftRecursion".into(),
                format!("Detected left recursion for nonterminal '{}'.", name),
            ));
        }
        self.on_path[id] = true;

        match &elements[id].kind {
            ElementKind::Constant { .. } | ElementKind::Regex(_) => {}
            ElementKind::Node { name, content } => {
                self.name_stack.push(name.clone());
                self.visit(elements, content.0)?;
                self.name_stack.pop();
            }
            ElementKind::List { content } => {
                self.visit(elements, content.0)?;
            }
            ElementKind::Concat { members } => {
                for member in members {
                    self.visit(elements, member.0)?;
                    if !elements[member.0].optional {
                        break;
                    }
                }
            }
            ElementKind::Union { members, .. } => {
                for member in members {
                    self.visit(elements, member.0)?;
                }
            }
        }

        self.on_path[id] = false;
        self.validated[id] = true;
        Ok(())
    }
}
