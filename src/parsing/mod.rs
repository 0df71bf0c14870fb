//! The recursive descent interpreter executing a prepared [Grammar] against an input text.

#[cfg(test)]
mod __tests__;

use crate::grammar::{ElementKind, PatternField};
use crate::{
    ASTNode, Cache, CacheKey, Code, ElementId, Grammar, ParseError, ParsedResult, SuccessData,
};
use std::rc::Rc;

impl Grammar {
    /// Parse the given input text and return the children of the start production's tree.
    ///
    /// The whole input has to be consumed; a partial match is a failure. Parsing allocates its
    /// working state per invocation, so a prepared grammar can parse any number of inputs.
    pub fn parse<'c>(&self, text: &'c str) -> Result<Vec<ASTNode<'c>>, ParseError> {
        let code = Code::from(text);
        let mut cache = Cache::root();

        match self.advance(self.root(), 0, &code, &mut cache) {
            Some(data) if data.consumed_index == code.value.len() => {
                // The start production wraps the whole parse; consumers receive its children.
                match data.children.into_iter().next() {
                    Some(tree) => Ok(tree.children),
                    None => Ok(Vec::new()),
                }
            }
            result => Err(cache.create_error(
                &code,
                result.map(|data| data.consumed_index),
                self,
            )),
        }
    }

    fn advance<'c>(
        &self,
        id: ElementId,
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        if self.element(id).cached != Some(true) {
            return self.advance_element(id, index, code, cache);
        }

        let key = CacheKey::from(id);
        match cache.find(key, index) {
            Some(result) => result.clone(),
            None => {
                let result = self.advance_element(id, index, code, cache);
                cache.insert(key, index, result.clone());
                result
            }
        }
    }

    fn advance_element<'c>(
        &self,
        id: ElementId,
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        match &self.element(id).kind {
            ElementKind::Constant { text } => self.advance_constant(id, text, index, code, cache),
            ElementKind::Regex(field) => self.advance_regex(id, field, index, code, cache),
            ElementKind::Node { name, content } => {
                self.advance_node(name, *content, index, code, cache)
            }
            ElementKind::Concat { members } => self.advance_concat(members, index, code, cache),
            ElementKind::List { content } => self.advance_list(*content, index, code, cache),
            ElementKind::Union {
                members,
                exhaustive,
            } => self.advance_union(members, *exhaustive, index, code, cache),
        }
    }

    fn advance_constant<'c>(
        &self,
        id: ElementId,
        text: &str,
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        if code.value[index..].starts_with(text) {
            Some(SuccessData::hidden(index + text.len()))
        } else {
            cache.record_failure(index, id);
            None
        }
    }

    fn advance_regex<'c>(
        &self,
        id: ElementId,
        field: &PatternField,
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        if field.captures.is_empty() {
            return match field.regexp.find(&code.value[index..]) {
                Some(matched) => {
                    debug_assert!(
                        matched.start() == 0,
                        "Pattern expression should match from the current position."
                    );
                    Some(SuccessData::hidden(index + matched.end()))
                }
                None => {
                    cache.record_failure(index, id);
                    None
                }
            };
        }

        match field.regexp.captures(&code.value[index..]) {
            Some(captured) => {
                let matched = match captured.get(0) {
                    Some(matched) => matched,
                    None => return None,
                };
                debug_assert!(
                    matched.start() == 0,
                    "Pattern expression should match from the current position."
                );
                let consumed_ptr = index + matched.end();

                let mut children: Vec<ASTNode<'c>> = Vec::new();
                for (group_index, group_name) in field.captures.iter().enumerate() {
                    // Unmatched groups contribute no child node.
                    if let Some(group) = captured.get(group_index + 1) {
                        let start = index + group.start();
                        let end = index + group.end();
                        children.push(ASTNode::leaf(
                            group_name.clone(),
                            start,
                            end,
                            &code.value[start..end],
                        ));
                    }
                }

                let tree = ASTNode::new(
                    field.name.clone(),
                    index,
                    consumed_ptr,
                    &code.value[index..consumed_ptr],
                    children,
                );
                Some(SuccessData::tree(consumed_ptr, tree))
            }
            None => {
                cache.record_failure(index, id);
                None
            }
        }
    }

    fn advance_node<'c>(
        &self,
        name: &Rc<str>,
        content: ElementId,
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        #[cfg(debug_assertions)]
        self.log_entry(name, index, code);

        let result = match self.advance(content, index, code, cache) {
            Some(data) => {
                let consumed_ptr = data.consumed_index;
                let tree = ASTNode::new(
                    name.clone(),
                    index,
                    consumed_ptr,
                    &code.value[index..consumed_ptr],
                    data.children,
                );
                Some(SuccessData::tree(consumed_ptr, tree))
            }
            None => None,
        };

        #[cfg(debug_assertions)]
        self.log_result(name, index, code, &result);

        result
    }

    fn advance_concat<'c>(
        &self,
        members: &[ElementId],
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        let mut moved_ptr = index;
        let mut parsed_children: Vec<ASTNode<'c>> = Vec::new();
        for member in members {
            match self.advance(*member, moved_ptr, code, cache) {
                Some(data) => {
                    moved_ptr = data.consumed_index;
                    parsed_children.extend(data.children);
                }
                None => {
                    // A member which can match empty input is skipped; anything else fails the
                    // whole concatenation.
                    if !self.element(*member).optional {
                        return None;
                    }
                }
            }
        }
        Some(SuccessData::new(moved_ptr, parsed_children))
    }

    fn advance_list<'c>(
        &self,
        content: ElementId,
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        let mut moved_ptr = index;
        let mut parsed_children: Vec<ASTNode<'c>> = Vec::new();
        loop {
            match self.advance(content, moved_ptr, code, cache) {
                // A repetition only continues while the content advances the cursor, so a
                // content matching empty input cannot loop forever.
                Some(data) if data.consumed_index > moved_ptr => {
                    moved_ptr = data.consumed_index;
                    parsed_children.extend(data.children);
                }
                _ => break,
            }
        }
        if moved_ptr > index {
            Some(SuccessData::new(moved_ptr, parsed_children))
        } else {
            None
        }
    }

    fn advance_union<'c>(
        &self,
        members: &[ElementId],
        exhaustive: bool,
        index: usize,
        code: &Code<'c>,
        cache: &mut Cache<'c>,
    ) -> ParsedResult<'c> {
        if !exhaustive {
            for member in members {
                if let Some(data) = self.advance(*member, index, code, cache) {
                    return Some(data);
                }
            }
            return None;
        }

        let mut best: ParsedResult<'c> = None;
        for member in members {
            if let Some(data) = self.advance(*member, index, code, cache) {
                let better = match &best {
                    Some(current) => data.consumed_index > current.consumed_index,
                    None => true,
                };
                if better {
                    best = Some(data);
                }
            }
        }
        best
    }
}
