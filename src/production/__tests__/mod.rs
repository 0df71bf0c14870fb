use super::{
    cached, one_or_more, pattern, possibly, refer, terminal, uncached, zero_or_more, Production,
    ProductionKind,
};

#[test]
fn conversion_test() {
    let constant: Production = "hello".into();
    match constant.kind {
        ProductionKind::Constant(ref text) => assert_eq!(text, "hello"),
        _ => panic!("A string should convert into a constant terminal."),
    }

    let concatenation: Production = vec![terminal("a"), refer("x")].into();
    match concatenation.kind {
        ProductionKind::Concat(ref members) => assert_eq!(members.len(), 2),
        _ => panic!("A production list should convert into a concatenation."),
    }
}

#[test]
fn wrapper_flags_test() {
    let optional = possibly(terminal("a"));
    assert!(optional.optional);
    assert_eq!(optional.cached, None);

    let memoized = cached(zero_or_more(terminal("a")));
    assert_eq!(memoized.cached, Some(true));
    assert!(memoized.optional);

    let unmemoized = uncached(refer("x"));
    assert_eq!(unmemoized.cached, Some(false));

    assert!(!one_or_more(terminal("a")).optional);
    assert!(zero_or_more(terminal("a")).optional);
}

#[test]
fn pattern_nullability_test() {
    match pattern(r"a*").unwrap().kind {
        ProductionKind::Regex(field) => assert!(field.nullable),
        _ => panic!("A pattern should build a regex terminal."),
    }
    match pattern(r"a+").unwrap().kind {
        ProductionKind::Regex(field) => assert!(!field.nullable),
        _ => panic!("A pattern should build a regex terminal."),
    }
}

#[test]
fn pattern_capture_names_test() {
    match pattern(r"(?P<first>[a-z]+)=(?P<second>[0-9]+)").unwrap().kind {
        ProductionKind::Regex(field) => {
            let names: Vec<&str> = field.captures.iter().map(|name| name.as_ref()).collect();
            assert_eq!(names, vec!["first", "second"]);
        }
        _ => panic!("A pattern should build a regex terminal."),
    }

    match pattern(r"([a-z]+)=([0-9]+)").unwrap().kind {
        ProductionKind::Regex(field) => {
            let names: Vec<&str> = field.captures.iter().map(|name| name.as_ref()).collect();
            assert_eq!(names, vec!["1", "2"]);
        }
        _ => panic!("A pattern should build a regex terminal."),
    }
}

#[test]
fn pattern_mixed_capture_groups_test() {
    match pattern(r"(?P<name>[a-z]+)=([0-9]+)") {
        Ok(_) => panic!("Mixed named and unnamed groups should be rejected."),
        Err(err) => {
            let message = format!("{}", err);
            assert!(message.contains("mixes named and unnamed capture groups"), "{}", message);
        }
    }
}

#[test]
fn pattern_invalid_expression_test() {
    match pattern(r"(unclosed") {
        Ok(_) => panic!("An invalid expression should be rejected."),
        Err(err) => println!("{}", err),
    }
}
