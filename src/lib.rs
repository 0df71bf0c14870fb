//! Language grammar tool (lang_gram) is a library to compose a context-free grammar and parse text
//! into a concrete parse tree ([ASTNode]) with a scannerless recursive descent packrat parser.
//!
//! # Overview
//! A parser is usually built in two phases, where a tokenizer first splits the input into a token
//! stream and a parser then consumes the tokens against the grammar.
//! However, splitting the input up front forces a single tokenization for the whole document,
//! which does not suit languages where the meaning of a character sequence depends on the
//! production being parsed.
//! This library therefore skips the tokenization phase altogether: grammar productions are
//! composed from high-level operators together with low-level regular expression terminals which
//! consume raw characters, so that different productions can apply different character patterns at
//! the same position.
//!
//! # Design
//!
//! A grammar is written as a set of named productions built from a small operator set like
//! [sequence](production::sequence), [any_of](production::any_of),
//! [zero_or_more](production::zero_or_more), and [pattern](production::pattern).
//! The [build_grammar] function normalizes the production set into a graph of grammar elements,
//! resolves the cross-references between productions, computes which elements can match the empty
//! string, and rejects left-recursive grammars before any parsing takes place.
//! The prepared [Grammar] is immutable and can parse any number of inputs; productions wrapped
//! with [cached](production::cached) are memoized per input position (Packrat parsing) while a
//! single input is consumed.
//!
//! # Example
//!
//! Following is a parser for nested comma-separated lists implemented with lang_gram.
//! ```
//! use lang_gram::build_grammar;
//! use lang_gram::production::{any_of, pattern, refer, sequence, terminal, zero_or_more};
//!
//! let grammar = build_grammar(
//!     vec![
//!         (
//!             "list",
//!             sequence(vec![
//!                 terminal("("),
//!                 refer("item"),
//!                 zero_or_more(sequence(vec![terminal(","), refer("item")])),
//!                 terminal(")"),
//!             ]),
//!         ),
//!         ("item", any_of(vec![refer("number"), refer("list")])),
//!         ("number", pattern(r"[0-9]+").unwrap()),
//!     ],
//!     "list",
//! )
//! .unwrap();
//!
//! let trees = grammar.parse("(1,(2,3),4)").unwrap();
//! assert_eq!(trees.len(), 3);
//! assert_eq!(trees[0].text, "1");
//! assert_eq!(trees[1].text, "(2,3)");
//! assert_eq!(trees[0].children[0].name.as_ref(), "number");
//!
//! match grammar.parse("(1,2") {
//!     Ok(_) => panic!("Parsing should fail."),
//!     Err(err) => assert_eq!(err.pointer, 4),
//! }
//! ```
//!
//! # License
//! [lang_gram](crate) is provided under the MIT license.

mod ast_node;
mod cache;
mod code;
mod error;
pub mod examples;
mod grammar;
mod logger;
mod parsing;
mod position;
pub mod production;
mod success_data;

use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Assemble a [Grammar] from a set of named productions.
///
/// Each entry maps a production key to its body; the key becomes the name of the corresponding
/// grammar element and appears on the parse tree nodes the production emits.
/// References created with [refer](production::refer) are resolved against the keys, so
/// productions can reference each other cyclically and in any definition order.
/// ### Arguments
/// * `productions` - Named production bodies.
/// * `start` - The key of the start production.
pub fn build_grammar(
    productions: Vec<(&str, production::Production)>,
    start: &str,
) -> Result<Grammar, ImplementationError> {
    grammar::assemble(productions, start)
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
/// A stable index of a grammar element in the element arena of a [Grammar].
pub struct ElementId(pub(crate) usize);

#[derive(Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
///  A unique key to save and retrieve parsed results for the Packrat parsing technique.
pub struct CacheKey(usize);

#[derive(Clone)]
/// Concrete parse tree of a consumed slice of the input.
pub struct ASTNode<'c> {
    pub name: Rc<str>,
    pub start: usize, // Starting position of the consumed input slice.
    pub end: usize,   // End position of the consumed input slice.
    pub text: &'c str, // The consumed slice itself.
    pub children: Vec<ASTNode<'c>>, // Children of the parse tree.
}

#[derive(Debug, Clone)]
/// A success value returned from a grammar element when it consumes input at a position.
pub struct SuccessData<'c> {
    pub consumed_index: usize,
    pub children: Vec<ASTNode<'c>>,
}

/// A result returned from a grammar element when it tries to consume input at a position.
///
/// [None] indicates a mismatch; the failed terminal positions are tracked separately in [Cache].
pub type ParsedResult<'c> = Option<SuccessData<'c>>;

/// Working state of a single parse invocation.
///
/// The cache stores parsed results per (element, position) for productions enabled for the
/// Packrat parsing technique, and tracks the furthest position at which any terminal failed
/// for the failure diagnostic. It is created when parsing starts and discarded when it returns.
pub struct Cache<'c> {
    parsed_result_cache: HashMap<(CacheKey, usize), ParsedResult<'c>>,
    failed_offset: usize,
    failed_terminals: Vec<ElementId>,
}

#[derive(Debug)]
/// An error returned due to failed validation of the production set and grammar.
pub struct ImplementationError {
    message: String,
    what: String,
}

#[derive(Debug, Clone)]
/// An error returned when the parser failed to consume the input because of a syntax error.
pub struct ParseError {
    pub pointer: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
/// The line and column information at a code point.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A wrapper for the input text to be parsed with lines information.
pub struct Code<'c> {
    pub value: &'c str,
    line_breaks: OnceCell<Vec<usize>>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// A enum structure to assign multiple level debugging to a grammar.
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

/// A prepared grammar: an arena of grammar elements with resolved references and analysis
/// verdicts, ready to parse input text.
///
/// A [Grammar] is obtained from [build_grammar] and is immutable afterwards; element
/// cross-references are stable [ElementId] indices into the arena, so the cyclic production
/// graph needs no shared ownership.
pub struct Grammar {
    root: ElementId,
    elements: Vec<grammar::GrammarElement>,
    productions: Vec<(Rc<str>, ElementId)>,
    max_element_id: usize,
    debugger: OnceCell<Log<&'static str>>,
}
