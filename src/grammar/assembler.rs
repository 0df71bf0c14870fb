use super::{nullability, validation, ElementKind, GrammarElement};
use crate::production::{Production, ProductionKind};
use crate::{ElementId, Grammar, ImplementationError};
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

// Placeholder content of a reserved production node until its body is lowered.
const UNRESOLVED: ElementId = ElementId(usize::MAX);

/// Normalize the production set into the element arena and run the build-time analyses.
pub(crate) fn assemble(
    productions: Vec<(&str, Production)>,
    start: &str,
) -> Result<Grammar, ImplementationError> {
    let mut assembler = Assembler {
        elements: Vec::new(),
        twins: HashMap::new(),
    };

    // Reserve a required and an optional node twin per key up front, so references resolve
    // regardless of definition order. The twins share their content element: a reference site
    // inside possibly(..) resolves to the optional twin, every other site to the required one.
    let mut named: Vec<(Rc<str>, Production)> = Vec::with_capacity(productions.len());
    for (key, body) in productions {
        if assembler.twins.contains_key(key) {
            return Err(ImplementationError::new(
                "InitializationError".into(),
                format!("Production '{}' is defined more than once.", key),
            ));
        }
        let name: Rc<str> = Rc::from(key);
        let required = assembler.push(GrammarElement {
            optional: false,
            cached: None,
            kind: ElementKind::Node {
                name: name.clone(),
                content: UNRESOLVED,
            },
        });
        let optional = assembler.push(GrammarElement {
            optional: true,
            cached: None,
            kind: ElementKind::Node {
                name: name.clone(),
                content: UNRESOLVED,
            },
        });
        assembler.twins.insert(key.to_string(), (required, optional));
        named.push((name, body));
    }

    let root = match assembler.twins.get(start) {
        Some((required, _)) => *required,
        None => {
            return Err(ImplementationError::new(
                "InitializationError".into(),
                format!("Couldn't find start production '{}'.", start),
            ));
        }
    };

    let mut production_table: Vec<(Rc<str>, ElementId)> = Vec::with_capacity(named.len());
    for (name, body) in named {
        let content = assembler.lower(body, Some(name.as_ref()))?;
        let (required, optional) = assembler.twins[name.as_ref()];
        assembler.set_content(required, content);
        assembler.set_content(optional, content);
        production_table.push((name, required));
    }

    nullability::obtain_nullability(&mut assembler.elements);
    validation::validate(
        &assembler.elements,
        production_table.iter().map(|(_, id)| *id),
    )?;

    let max_element_id = assembler.elements.len();
    Ok(Grammar {
        root,
        elements: assembler.elements,
        productions: production_table,
        max_element_id,
        debugger: OnceCell::new(),
    })
}

struct Assembler {
    elements: Vec<GrammarElement>,
    twins: HashMap<String, (ElementId, ElementId)>,
}

impl Assembler {
    fn push(&mut self, element: GrammarElement) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(element);
        id
    }

    fn set_content(&mut self, id: ElementId, content: ElementId) {
        if let ElementKind::Node { content: slot, .. } = &mut self.elements[id.0].kind {
            *slot = content;
        }
    }

    /// Lower a production description into arena elements and return the element of its root.
    ///
    /// `rule_name` is the owning production key and is only set for the direct body of a
    /// production, where a pattern terminal takes the key as its display name.
    fn lower(
        &mut self,
        production: Production,
        rule_name: Option<&str>,
    ) -> Result<ElementId, ImplementationError> {
        let Production {
            kind,
            optional,
            cached,
        } = production;

        let kind = match kind {
            ProductionKind::Constant(text) => {
                if text.is_empty() {
                    return Err(ImplementationError::new(
                        "InitializationError".into(),
                        "A constant terminal requires non-empty text.".into(),
                    ));
                }
                ElementKind::Constant { text }
            }
            ProductionKind::Regex(mut field) => {
                // Each pattern occurrence becomes its own element, so every usage site keeps
                // its own identity in the cache and in the diagnostics.
                if let Some(name) = rule_name {
                    field.name = Rc::from(name);
                }
                ElementKind::Regex(field)
            }
            ProductionKind::Concat(members) => {
                let mut ids = Vec::with_capacity(members.len());
                for member in members {
                    ids.push(self.lower(member, None)?);
                }
                ElementKind::Concat { members: ids }
            }
            ProductionKind::List(content) => ElementKind::List {
                content: self.lower(*content, None)?,
            },
            ProductionKind::Union {
                members,
                exhaustive,
            } => {
                if members.is_empty() {
                    return Err(ImplementationError::new(
                        "InitializationError".into(),
                        "An alternative production requires at least one symbol.".into(),
                    ));
                }
                let mut ids = Vec::with_capacity(members.len());
                for member in members {
                    ids.push(self.lower(member, None)?);
                }
                ElementKind::Union {
                    members: ids,
                    exhaustive,
                }
            }
            ProductionKind::Reference(target) => {
                let (required, optional_twin) = match self.twins.get(target.as_str()) {
                    Some(twins) => *twins,
                    None => {
                        return Err(ImplementationError::new(
                            "ReferenceError".into(),
                            format!(
                                "Couldn't find production '{}' to resolve the reference.",
                                target
                            ),
                        ));
                    }
                };
                // A reference is replaced by the matching twin; its other header flags are
                // dropped along with the reference itself.
                return Ok(if optional { optional_twin } else { required });
            }
        };

        Ok(self.push(GrammarElement {
            optional,
            cached,
            kind,
        }))
    }
}
