use crate::production::{any_of, cached, one_or_more, pattern, refer, sequence, zero_or_more};
use crate::{build_grammar, Grammar, ImplementationError};

/// An XML document grammar without a tokenizer.
///
/// The document is a flat series of markup fragments; tag nesting is left to the consumer of the
/// parse tree. Tag and attribute names are exposed through the `tagName`, `attributeName` and
/// `attributeValue` capture groups.
pub fn xml_grammar() -> Result<Grammar, ImplementationError> {
    build_grammar(
        vec![
            (
                "document",
                one_or_more(any_of(vec![
                    refer("comment"),
                    refer("declarationTag"),
                    refer("closingTag"),
                    refer("openingTag"),
                    refer("textFragment"),
                ])),
            ),
            (
                "openingTag",
                cached(sequence(vec![
                    refer("openingTagStart"),
                    zero_or_more(refer("tagAttribute")),
                    any_of(vec![refer("selfClosingTagEnd"), refer("tagEnd")]),
                ])),
            ),
            (
                "openingTagStart",
                pattern(r"<\s*(?P<tagName>[A-Za-z_][\w.-]*)")?,
            ),
            (
                "tagAttribute",
                pattern(r#"\s+(?P<attributeName>[A-Za-z_][\w.-]*)(?:\s*=\s*"(?P<attributeValue>[^"]*)")?"#)?,
            ),
            ("tagEnd", pattern(r"\s*>")?),
            ("selfClosingTagEnd", pattern(r"\s*/>")?),
            (
                "closingTag",
                pattern(r"<\s*/\s*(?P<tagName>[A-Za-z_][\w.-]*)\s*>")?,
            ),
            (
                "declarationTag",
                sequence(vec![
                    refer("declarationTagOpening"),
                    zero_or_more(refer("declarationTagAttribute")),
                    refer("tagEnd"),
                ]),
            ),
            (
                "declarationTagOpening",
                pattern(r"<!\s*(?P<tagName>[A-Za-z_][\w.-]*)")?,
            ),
            (
                "declarationTagAttribute",
                pattern(r#"\s+(?P<attributeName>[A-Za-z_][\w.-]*)(?:\s*=\s*"(?P<attributeValue>[^"]*)")?"#)?,
            ),
            ("comment", pattern(r"<!--(?s:.)*?-->")?),
            ("textFragment", pattern(r"[^<]+")?),
        ],
        "document",
    )
}
