use crate::{Cache, CacheKey, Code, ElementId, Grammar, ParseError, ParsedResult};
use std::collections::HashMap;
use std::fmt::Write;

impl From<ElementId> for CacheKey {
    fn from(id: ElementId) -> Self {
        CacheKey(id.0)
    }
}

impl<'c> Cache<'c> {
    pub fn root() -> Self {
        Self {
            parsed_result_cache: HashMap::new(),
            failed_offset: 0,
            failed_terminals: Vec::new(),
        }
    }

    pub fn find(&self, key: CacheKey, index: usize) -> Option<&ParsedResult<'c>> {
        self.parsed_result_cache.get(&(key, index))
    }

    pub fn insert(
        &mut self,
        key: CacheKey,
        index: usize,
        result: ParsedResult<'c>,
    ) -> Option<ParsedResult<'c>> {
        self.parsed_result_cache.insert((key, index), result)
    }

    /// Record a terminal mismatch for the failure diagnostic.
    ///
    /// Only the furthest failed position is kept: a mismatch further right replaces the record,
    /// a mismatch at the recorded position appends the terminal, and anything before it is
    /// discarded.
    pub fn record_failure(&mut self, index: usize, element: ElementId) {
        if self.failed_terminals.is_empty() || index > self.failed_offset {
            self.failed_offset = index;
            self.failed_terminals.clear();
            self.failed_terminals.push(element);
        } else if index == self.failed_offset {
            self.failed_terminals.push(element);
        }
    }

    pub fn create_error(
        &self,
        code: &Code,
        parsed_to: Option<usize>,
        grammar: &Grammar,
    ) -> ParseError {
        let (pointer, mut error_message) = if self.failed_terminals.is_empty() {
            let end = parsed_to.unwrap_or(0);
            (
                end,
                format!(
                    "Failed parsing the input text. Parsed length was {}. Input length was {}.",
                    end,
                    code.value.len()
                ),
            )
        } else {
            let mut labels: Vec<String> = Vec::new();
            for element in &self.failed_terminals {
                let label = grammar.terminal_label(*element);
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            let expected = if labels.len() > 1 {
                format!("any of {}", labels.join(", "))
            } else {
                labels.concat()
            };
            (
                self.failed_offset,
                format!(
                    "Failed parsing the input text. Expected {} at position {}.",
                    expected, self.failed_offset
                ),
            )
        };

        let position = code.obtain_position(pointer);

        writeln!(error_message, "\nFailed to parse at {}.", position).unwrap();

        ParseError::new(pointer, error_message)
    }
}
