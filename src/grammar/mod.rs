//! The prepared grammar element graph and the build-time passes which produce it.
//!
//! [build_grammar](crate::build_grammar) lowers the user written [Production](crate::production::Production)
//! descriptions into an arena of [GrammarElement] values whose cross-references are stable
//! [ElementId] indices, runs the nullability analysis over the (possibly cyclic) element graph,
//! and rejects left recursive grammars before any parsing takes place.

mod assembler;
mod nullability;
mod validation;


pub(crate) use assembler::assemble;

use crate::{ElementId, Grammar};
use regex::Regex;
use std::fmt::Write;
use std::rc::Rc;

/// A grammar element of the prepared element arena.
///
/// The `optional` flag is the nullability verdict written by the analysis; `cached` enables the
/// Packrat parsing technique for the element when set to `Some(true)`.
pub(crate) struct GrammarElement {
    pub(crate) optional: bool,
    pub(crate) cached: Option<bool>,
    pub(crate) kind: ElementKind,
}

pub(crate) enum ElementKind {
    Constant {
        text: String,
    },
    Regex(PatternField),
    Node {
        name: Rc<str>,
        content: ElementId,
    },
    Concat {
        members: Vec<ElementId>,
    },
    List {
        content: ElementId,
    },
    Union {
        members: Vec<ElementId>,
        exhaustive: bool,
    },
}

#[derive(Clone)]
/// A compiled pattern terminal.
pub(crate) struct PatternField {
    pub(crate) name: Rc<str>, // The owning production key when the pattern is the production body.
    pub(crate) source: String,
    pub(crate) regexp: Regex,
    pub(crate) nullable: bool,
    pub(crate) captures: Vec<Rc<str>>, // One name per capture group of the expression.
}

impl Grammar {
    pub(crate) fn element(&self, id: ElementId) -> &GrammarElement {
        &self.elements[id.0]
    }

    pub(crate) fn root(&self) -> ElementId {
        self.root
    }

    /// The exclusive upper bound of the element IDs assigned during preparation.
    pub fn max_element_id(&self) -> usize {
        self.max_element_id
    }

    /// How a failed terminal is reported in the parse diagnostic.
    pub(crate) fn terminal_label(&self, id: ElementId) -> String {
        match &self.element(id).kind {
            ElementKind::Constant { text } => format!("'{}'", text),
            ElementKind::Regex(field) => {
                if field.name.is_empty() {
                    format!("/{}/", field.source)
                } else {
                    field.name.to_string()
                }
            }
            _ => String::new(),
        }
    }

    /// Write grammar text for the production set.
    pub fn grammar(&self) -> Result<String, std::fmt::Error> {
        let mut writer = String::new();
        for (name, id) in &self.productions {
            writeln!(writer, "{}", name)?;
            let content = match &self.element(*id).kind {
                ElementKind::Node { content, .. } => *content,
                _ => *id,
            };
            write!(writer, "{:>6} ", ":")?;
            self.write_element(content, &mut writer)?;
            writeln!(writer)?;
            writeln!(writer, "{:>6}", ";")?;
            writeln!(writer)?;
        }
        Ok(writer)
    }

    fn write_element(&self, id: ElementId, writer: &mut String) -> Result<(), std::fmt::Error> {
        let element = self.element(id);
        match &element.kind {
            ElementKind::Constant { text } => {
                write!(writer, "'{}'", text)?;
                if element.optional {
                    write!(writer, "?")?;
                }
            }
            ElementKind::Regex(field) => {
                if field.name.is_empty() {
                    write!(writer, "/{}/", field.source)?;
                } else {
                    write!(writer, "{}", field.name)?;
                }
                if element.optional {
                    write!(writer, "?")?;
                }
            }
            ElementKind::Node { name, .. } => {
                write!(writer, "{}", name)?;
                if element.optional {
                    write!(writer, "?")?;
                }
            }
            ElementKind::Concat { members } => {
                write!(writer, "(")?;
                for (index, member) in members.iter().enumerate() {
                    if index != 0 {
                        write!(writer, " ")?;
                    }
                    self.write_element(*member, writer)?;
                }
                write!(writer, ")")?;
                if element.optional {
                    write!(writer, "?")?;
                }
            }
            ElementKind::List { content } => {
                write!(writer, "(")?;
                self.write_element(*content, writer)?;
                if element.optional {
                    write!(writer, ")*")?;
                } else {
                    write!(writer, ")+")?;
                }
            }
            ElementKind::Union { members, .. } => {
                write!(writer, "(")?;
                for (index, member) in members.iter().enumerate() {
                    if index != 0 {
                        write!(writer, " | ")?;
                    }
                    self.write_element(*member, writer)?;
                }
                write!(writer, ")")?;
                if element.optional {
                    write!(writer, "?")?;
                }
            }
        }
        Ok(())
    }
}
