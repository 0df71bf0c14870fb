use super::{Production, ProductionKind};
use crate::grammar::PatternField;
use crate::ImplementationError;
use regex::Regex;
use std::rc::Rc;

/// Create a constant terminal which matches the given text at the current position.
///
/// A plain string converts into the same production, so the explicit operator is only needed
/// where a [Production] value is required up front.
pub fn terminal(text: &str) -> Production {
    Production::new(ProductionKind::Constant(text.to_string()))
}

/// Compile a regular expression into a pattern terminal.
///
/// The expression is anchored so the compiled regex only matches at the current position.
/// Capture groups become children of the emitted parse tree node; a named group contributes its
/// declared name while a numbered group contributes its 1-based index.
/// Mixing named and unnamed groups in one pattern is rejected because their relative order can
/// not be recovered from the regex engine.
/// ### Arguments
/// * `expression` - A regex expression matched against the characters at the current position.
pub fn pattern(expression: &str) -> Result<Production, ImplementationError> {
    let regexp = Regex::new(&format!("^(?:{})", expression))
        .map_err(|err| ImplementationError::new("PatternError".into(), format!("{}", err)))?;

    let group_count = regexp.captures_len() - 1;
    let named: Vec<&str> = regexp.capture_names().skip(1).flatten().collect();
    if !named.is_empty() && named.len() != group_count {
        return Err(ImplementationError::new(
            "PatternError".into(),
            format!(
                "Pattern '/{}/' mixes named and unnamed capture groups.",
                expression
            ),
        ));
    }
    let captures: Vec<Rc<str>> = if named.is_empty() {
        (1..=group_count).map(|index| Rc::from(index.to_string())).collect()
    } else {
        named.into_iter().map(Rc::from).collect()
    };

    let nullable = regexp.is_match("");

    Ok(Production::new(ProductionKind::Regex(PatternField {
        name: Rc::from(""),
        source: expression.to_string(),
        regexp,
        nullable,
        captures,
    })))
}

/// Create a concatenation of the given productions.
pub fn sequence(members: Vec<Production>) -> Production {
    Production::new(ProductionKind::Concat(members))
}

/// Create an ordered choice which returns the first matching alternative.
pub fn any_of(members: Vec<Production>) -> Production {
    Production::new(ProductionKind::Union {
        members,
        exhaustive: false,
    })
}

/// Create an exhaustive choice which tries every alternative and returns the longest match.
///
/// Ties are broken by declaration order.
pub fn best_of(members: Vec<Production>) -> Production {
    Production::new(ProductionKind::Union {
        members,
        exhaustive: true,
    })
}

/// Create a repetition which matches the given production zero or more times.
pub fn zero_or_more(content: impl Into<Production>) -> Production {
    let mut production = Production::new(ProductionKind::List(Box::new(content.into())));
    production.optional = true;
    production
}

/// Create a repetition which matches the given production one or more times.
pub fn one_or_more(content: impl Into<Production>) -> Production {
    Production::new(ProductionKind::List(Box::new(content.into())))
}

/// Create a copy of the given production which is allowed to match empty input.
pub fn possibly(content: impl Into<Production>) -> Production {
    let mut production = content.into();
    production.optional = true;
    production
}

/// Create a copy of the given production with memoization enabled for the Packrat parsing
/// technique.
pub fn cached(content: impl Into<Production>) -> Production {
    let mut production = content.into();
    production.cached = Some(true);
    production
}

/// Create a copy of the given production with memoization explicitly disabled.
pub fn uncached(content: impl Into<Production>) -> Production {
    let mut production = content.into();
    production.cached = Some(false);
    production
}

/// Create a reference to another production of the grammar by its key.
pub fn refer(name: &str) -> Production {
    Production::new(ProductionKind::Reference(name.to_string()))
}
