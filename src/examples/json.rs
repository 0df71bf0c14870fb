use crate::production::{any_of, cached, pattern, possibly, refer, sequence, zero_or_more};
use crate::{build_grammar, Grammar, ImplementationError};

/// A JSON grammar without a tokenizer.
///
/// Surrounding whitespace is absorbed by the pattern terminals, so the grammar itself only
/// describes the JSON structure. The scalar literals expose their text through a `value`
/// capture group.
pub fn json_grammar() -> Result<Grammar, ImplementationError> {
    build_grammar(
        vec![
            ("document", refer("valueExpression")),
            (
                "valueExpression",
                cached(any_of(vec![
                    refer("objectExpression"),
                    refer("arrayExpression"),
                    refer("stringLiteral"),
                    refer("numberLiteral"),
                    refer("booleanLiteral"),
                    refer("nullLiteral"),
                ])),
            ),
            (
                "objectExpression",
                sequence(vec![
                    refer("openBrace"),
                    possibly(sequence(vec![
                        refer("objectPropertyExpression"),
                        zero_or_more(sequence(vec![
                            refer("comma"),
                            refer("objectPropertyExpression"),
                        ])),
                    ])),
                    refer("closeBrace"),
                ]),
            ),
            (
                "objectPropertyExpression",
                sequence(vec![
                    refer("stringLiteral"),
                    refer("colon"),
                    refer("valueExpression"),
                ]),
            ),
            (
                "arrayExpression",
                sequence(vec![
                    refer("openBracket"),
                    possibly(sequence(vec![
                        refer("valueExpression"),
                        zero_or_more(sequence(vec![refer("comma"), refer("valueExpression")])),
                    ])),
                    refer("closeBracket"),
                ]),
            ),
            (
                "stringLiteral",
                pattern(r#"\s*"(?P<value>(?:[^"\\\r\n]|\\.)*)"\s*"#)?,
            ),
            (
                "numberLiteral",
                pattern(r"\s*(?P<value>-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?)\s*")?,
            ),
            ("booleanLiteral", pattern(r"\s*(?P<value>true|false)\s*")?),
            ("nullLiteral", pattern(r"\s*null\s*")?),
            ("openBrace", pattern(r"\s*\{")?),
            ("closeBrace", pattern(r"\s*\}\s*")?),
            ("openBracket", pattern(r"\s*\[")?),
            ("closeBracket", pattern(r"\s*\]\s*")?),
            ("comma", pattern(r"\s*,")?),
            ("colon", pattern(r"\s*:")?),
        ],
        "document",
    )
}
