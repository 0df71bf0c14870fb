use super::{ElementKind, GrammarElement};
use std::collections::HashMap;

/// Compute for every element whether it can succeed while consuming zero characters, and write
/// the verdict onto the element headers.
///
/// The element graph is cyclic, so plain recursion cannot settle every element. A depth-first
/// pass resolves everything reachable without a back-edge; elements blocked on a back-edge are
/// kept with their unknown dependencies and settled by iterative elimination. Whatever remains
/// afterwards depends only on mutually cyclic elements whose resolved dependencies are all
/// optional, and such a cluster can always derive the empty string.
pub(crate) fn obtain_nullability(elements: &mut Vec<GrammarElement>) {
    let count = elements.len();
    let mut analyzer = Analyzer {
        verdicts: vec![None; count],
        visiting: vec![false; count],
        visited: vec![false; count],
        unresolved: HashMap::new(),
    };

    for id in 0..count {
        analyzer.visit(elements, id);
    }

    loop {
        let mut progressed = false;
        let pending: Vec<usize> = analyzer.unresolved.keys().copied().collect();
        for id in pending {
            let dependencies = match analyzer.unresolved.get(&id) {
                Some(dependencies) => dependencies.clone(),
                None => continue,
            };
            let mut blocked = false;
            let mut remaining = Vec::new();
            for dependency in dependencies {
                match analyzer.verdicts[dependency] {
                    Some(false) => {
                        blocked = true;
                        break;
                    }
                    Some(true) => progressed = true,
                    None => remaining.push(dependency),
                }
            }
            if blocked {
                analyzer.verdicts[id] = Some(false);
                analyzer.unresolved.remove(&id);
                progressed = true;
            } else if remaining.is_empty() {
                analyzer.verdicts[id] = Some(true);
                analyzer.unresolved.remove(&id);
                progressed = true;
            } else {
                analyzer.unresolved.insert(id, remaining);
            }
        }
        if !progressed {
            break;
        }
    }

    for (id, _) in analyzer.unresolved {
        analyzer.verdicts[id] = Some(true);
    }

    for (id, element) in elements.iter_mut().enumerate() {
        if let Some(verdict) = analyzer.verdicts[id] {
            element.optional = verdict;
        }
    }
}

struct Analyzer {
    verdicts: Vec<Option<bool>>,
    visiting: Vec<bool>,
    visited: Vec<bool>,
    unresolved: HashMap<usize, Vec<usize>>,
}

impl Analyzer {
    fn visit(&mut self, elements: &[GrammarElement], id: usize) -> Option<bool> {
        if let Some(verdict) = self.verdicts[id] {
            return Some(verdict);
        }
        if self.visiting[id] || self.visited[id] {
            return None;
        }
        self.visiting[id] = true;

        let element = &elements[id];
        let verdict = match &element.kind {
            ElementKind::Constant { .. } => Some(element.optional),
            ElementKind::Regex(field) => Some(element.optional || field.nullable),
            ElementKind::Node { content, .. } | ElementKind::List { content } => {
                if element.optional {
                    Some(true)
                } else {
                    match self.visit(elements, content.0) {
                        Some(verdict) => Some(verdict),
                        None => {
                            self.unresolved.insert(id, vec![content.0]);
                            None
                        }
                    }
                }
            }
            ElementKind::Concat { members } | ElementKind::Union { members, .. } => {
                // A union deliberately follows the same all-members rule as a concatenation.
                if element.optional {
                    Some(true)
                } else {
                    let mut unknown = Vec::new();
                    let mut verdict = Some(true);
                    for member in members {
                        match self.visit(elements, member.0) {
                            Some(false) => {
                                verdict = Some(false);
                                break;
                            }
                            Some(true) => {}
                            None => unknown.push(member.0),
                        }
                    }
                    if verdict == Some(false) {
                        Some(false)
                    } else if unknown.is_empty() {
                        Some(true)
                    } else {
                        self.unresolved.insert(id, unknown);
                        None
                    }
                }
            }
        };

        self.visiting[id] = false;
        self.visited[id] = true;
        if let Some(value) = verdict {
            self.verdicts[id] = Some(value);
        }
        verdict
    }
}
