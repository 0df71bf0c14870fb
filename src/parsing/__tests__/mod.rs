use crate::production::{
    any_of, best_of, cached, one_or_more, pattern, possibly, refer, sequence, terminal,
    zero_or_more, Production,
};
use crate::build_grammar;

#[test]
fn union_first_match_test() {
    let grammar = build_grammar(
        vec![
            (
                "p1",
                sequence(vec![
                    terminal("a"),
                    terminal("b"),
                    terminal("c"),
                    any_of(vec![refer("p2"), refer("p3")]),
                ]),
            ),
            ("p2", sequence(vec![terminal("x"), refer("p4"), terminal("z")])),
            (
                "p3",
                sequence(vec![terminal("x"), refer("p4"), terminal("z"), terminal("u")]),
            ),
            ("p4", terminal("y")),
        ],
        "p1",
    )
    .unwrap();

    // The first alternative wins and leaves the trailing 'u' unconsumed.
    match grammar.parse("abcxyzu") {
        Ok(_) => panic!("Parsing should fail."),
        Err(err) => {
            assert_eq!(err.pointer, 6);
            assert!(
                err.message
                    .contains("Parsed length was 6. Input length was 7."),
                "{}",
                err.message
            );
        }
    }
}

#[test]
fn union_exhaustive_test() {
    let grammar = build_grammar(
        vec![
            (
                "p1",
                sequence(vec![
                    terminal("a"),
                    terminal("b"),
                    terminal("c"),
                    best_of(vec![refer("p2"), refer("p3")]),
                ]),
            ),
            ("p2", sequence(vec![terminal("x"), refer("p4"), terminal("z")])),
            (
                "p3",
                sequence(vec![terminal("x"), refer("p4"), terminal("z"), terminal("u")]),
            ),
            ("p4", terminal("y")),
        ],
        "p1",
    )
    .unwrap();

    match grammar.parse("abcxyzu") {
        Ok(trees) => {
            assert_eq!(trees.len(), 1);
            assert_eq!(trees[0].name.as_ref(), "p3");
            assert_eq!(trees[0].start, 3);
            assert_eq!(trees[0].end, 7);
            assert_eq!(trees[0].text, "xyzu");
            assert_eq!(trees[0].children[0].name.as_ref(), "p4");
            assert_eq!(trees[0].children[0].text, "y");
        }
        Err(err) => panic!("{:?}", err),
    }
}

#[test]
fn union_exhaustive_tie_test() {
    let grammar = build_grammar(
        vec![
            ("main", best_of(vec![refer("first"), refer("second")])),
            ("first", pattern(r"[a-z]+").unwrap()),
            ("second", pattern(r"[a-z]+").unwrap()),
        ],
        "main",
    )
    .unwrap();

    // Equal match lengths are resolved in declaration order.
    let trees = grammar.parse("abc").unwrap();
    assert_eq!(trees[0].name.as_ref(), "first");
}

#[test]
fn empty_repetition_test() {
    let grammar = build_grammar(
        vec![(
            "main",
            sequence(vec![
                zero_or_more(pattern(r"a*").unwrap()),
                terminal("b"),
            ]),
        )],
        "main",
    )
    .unwrap();

    // The repetition body can match empty input; the loop has to exit as soon as the cursor
    // stops advancing.
    assert!(grammar.parse("b").is_ok());
    assert!(grammar.parse("aaab").is_ok());
    assert!(grammar.parse("aaa").is_err());
}

#[test]
fn possibly_skipped_member_test() {
    let grammar = build_grammar(
        vec![(
            "main",
            sequence(vec![terminal("a"), possibly(terminal("b")), terminal("c")]),
        )],
        "main",
    )
    .unwrap();

    assert!(grammar.parse("abc").is_ok());
    assert!(grammar.parse("ac").is_ok());
    assert!(grammar.parse("ab").is_err());
}

#[test]
fn greedy_repetition_test() {
    let grammar = build_grammar(
        vec![(
            "main",
            sequence(vec![one_or_more(terminal("a")), terminal("a")]),
        )],
        "main",
    )
    .unwrap();

    // The repetition is greedy and never gives characters back to the rest of the sequence.
    match grammar.parse("aa") {
        Ok(_) => panic!("Parsing should fail."),
        Err(err) => {
            assert!(
                err.message.contains("Expected 'a' at position 2."),
                "{}",
                err.message
            );
        }
    }
}

#[test]
fn pattern_capture_children_test() {
    let grammar = build_grammar(
        vec![("pair", pattern(r"(?P<key>[a-z]+)=(?P<val>[0-9]+)").unwrap())],
        "pair",
    )
    .unwrap();

    let trees = grammar.parse("count=42").unwrap();
    assert_eq!(trees.len(), 1);
    let pair = &trees[0];
    assert_eq!(pair.name.as_ref(), "pair");
    assert_eq!(pair.children.len(), 2);
    assert_eq!(pair.children[0].name.as_ref(), "key");
    assert_eq!(pair.children[0].text, "count");
    assert_eq!(pair.children[1].name.as_ref(), "val");
    assert_eq!(pair.children[1].text, "42");
}

#[test]
fn pattern_numbered_capture_test() {
    let grammar = build_grammar(
        vec![("pair", pattern(r"([a-z]+)=([0-9]+)").unwrap())],
        "pair",
    )
    .unwrap();

    let trees = grammar.parse("count=42").unwrap();
    let names: Vec<&str> = trees[0]
        .children
        .iter()
        .map(|child| child.name.as_ref())
        .collect();
    assert_eq!(names, vec!["1", "2"]);
}

#[test]
fn pattern_unmatched_group_test() {
    let grammar = build_grammar(
        vec![("main", pattern(r"(?P<sign>-)?(?P<digits>[0-9]+)").unwrap())],
        "main",
    )
    .unwrap();

    let trees = grammar.parse("42").unwrap();
    let names: Vec<&str> = trees[0]
        .children
        .iter()
        .map(|child| child.name.as_ref())
        .collect();
    assert_eq!(names, vec!["digits"]);

    let trees = grammar.parse("-42").unwrap();
    let names: Vec<&str> = trees[0]
        .children
        .iter()
        .map(|child| child.name.as_ref())
        .collect();
    assert_eq!(names, vec!["sign", "digits"]);
}

#[test]
fn expected_terminals_test() {
    let grammar = build_grammar(
        vec![(
            "main",
            any_of(vec![
                terminal("foo"),
                terminal("bar"),
                terminal("bar"),
                refer("digits"),
            ]),
        ), ("digits", pattern(r"[0-9]+").unwrap())],
        "main",
    )
    .unwrap();

    match grammar.parse("qux") {
        Ok(_) => panic!("Parsing should fail."),
        Err(err) => {
            // Duplicate terminals are reported once.
            assert!(
                err.message
                    .contains("Expected any of 'foo', 'bar', digits at position 0."),
                "{}",
                err.message
            );
            assert_eq!(err.pointer, 0);
        }
    }
}

#[test]
fn whole_input_required_test() {
    let grammar = build_grammar(vec![("main", terminal("a"))], "main").unwrap();
    match grammar.parse("ab") {
        Ok(_) => panic!("Parsing should fail."),
        Err(err) => {
            assert!(
                err.message
                    .contains("Parsed length was 1. Input length was 2."),
                "{}",
                err.message
            );
        }
    }
}

#[test]
fn cached_production_test() {
    let grammar = build_grammar(
        vec![
            (
                "main",
                any_of(vec![
                    sequence(vec![refer("digits"), terminal("a")]),
                    sequence(vec![refer("digits"), terminal("b")]),
                ]),
            ),
            ("digits", cached(pattern(r"[0-9]+").unwrap())),
        ],
        "main",
    )
    .unwrap();

    // The second alternative replays the memoized digits match before consuming 'b'.
    let trees = grammar.parse("12b").unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].name.as_ref(), "digits");
    assert_eq!(trees[0].text, "12");
}

fn list_grammar(memoized: bool) -> crate::Grammar {
    let wrap = |production: Production| {
        if memoized {
            cached(production)
        } else {
            production
        }
    };
    build_grammar(
        vec![
            (
                "list",
                wrap(sequence(vec![
                    terminal("("),
                    refer("item"),
                    zero_or_more(sequence(vec![terminal(","), refer("item")])),
                    terminal(")"),
                ])),
            ),
            (
                "item",
                wrap(any_of(vec![refer("number"), refer("list")])),
            ),
            ("number", pattern(r"[0-9]+").unwrap()),
        ],
        "list",
    )
    .unwrap()
}

#[test]
fn packrat_neutrality_test() {
    let plain = list_grammar(false);
    let memoized = list_grammar(true);

    let input = "(1,(2,(3,4),5),6)";
    let plain_trees = plain.parse(input).unwrap();
    let memoized_trees = memoized.parse(input).unwrap();

    // Memoization must not change the produced trees.
    assert_eq!(
        format!("{:?}", plain_trees),
        format!("{:?}", memoized_trees)
    );

    match (plain.parse("(1,(2)"), memoized.parse("(1,(2)")) {
        (Err(plain_err), Err(memoized_err)) => {
            assert_eq!(plain_err.pointer, memoized_err.pointer)
        }
        _ => panic!("Parsing should fail for both grammars."),
    }
}
