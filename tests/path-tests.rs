use tagpath::{interpret, json, xml, Path, Token, Trace};

const XML_INPUT: &str = "<universe>\
    <galaxy>\
        <world>nada</world>\
    </galaxy>\
    <galaxy>\
        <world>earth</world>\
        <world/>\
        <timelord>who</timelord>\
    </galaxy>\
    <timelord>master</timelord>\
</universe>";

const JSON_INPUT: &str = r#""universe": {
    galaxy: {
        world: "nada",
    },
    galaxy: {
        world: "earth",
        world: "",
        timelord: "who",
    },
    timelord: "master",
}"#;

fn evaluate(tokens: &[Token], expression: &str) -> String {
    interpret::evaluate(tokens, expression, false, &Trace::disabled())
}

/// Expression tables shared by both formats. The two tokenizers must
/// produce streams equivalent enough that one navigation engine gives the
/// same answers over either.
const GOOD_PATHS: &[(&str, &str)] = &[
    ("/world", "nada"),
    ("//world", "nada"),
    ("/galaxy/world", "nada"),
    ("/universe/galaxy/world", "nada"),
    ("/universe/galaxy[world=\"earth\"]", "earth  who"),
    ("/universe/galaxy[world=\"earth\"]/timelord", "who"),
    ("/galaxy[2]/timelord", "who"),
    ("/universe/galaxy[2]/timelord", "who"),
    ("/universe/timelord[2]", "master"),
    ("/universe/galaxy[world=\"earth\"]/timelord/", "who"),
];

const BAD_PATHS: &[(&str, &str)] = &[
    ("/galaxy[world=\"nada\"]/timelord", ""),
    ("/galaxy[world=\"venus\"]/timelord", ""),
    ("/galaxy[1]/timelord", ""),
    ("/universe/galaxy[3]/timelord", ""),
    ("/galaxy[3]/timelord", ""),
];

#[test]
fn xml_good_paths() {
    let tokens = xml::tokenize(XML_INPUT, &Trace::disabled());
    for (expression, expected) in GOOD_PATHS {
        assert_eq!(
            &evaluate(&tokens, expression),
            expected,
            "expression {:?}",
            expression
        );
    }
}

#[test]
fn json_good_paths() {
    let tokens = json::tokenize(JSON_INPUT, &Trace::disabled());
    for (expression, expected) in GOOD_PATHS {
        assert_eq!(
            &evaluate(&tokens, expression),
            expected,
            "expression {:?}",
            expression
        );
    }
}

#[test]
fn xml_bad_paths_return_empty() {
    let tokens = xml::tokenize(XML_INPUT, &Trace::disabled());
    for (expression, expected) in BAD_PATHS {
        assert_eq!(
            &evaluate(&tokens, expression),
            expected,
            "expression {:?}",
            expression
        );
    }
}

#[test]
fn json_bad_paths_return_empty() {
    let tokens = json::tokenize(JSON_INPUT, &Trace::disabled());
    for (expression, expected) in BAD_PATHS {
        assert_eq!(
            &evaluate(&tokens, expression),
            expected,
            "expression {:?}",
            expression
        );
    }
}

#[test]
fn cross_format_equivalence() {
    let xml_tokens = xml::tokenize(XML_INPUT, &Trace::disabled());
    let json_tokens = json::tokenize(JSON_INPUT, &Trace::disabled());
    for (expression, _) in GOOD_PATHS.iter().chain(BAD_PATHS) {
        assert_eq!(
            evaluate(&xml_tokens, expression),
            evaluate(&json_tokens, expression),
            "expression {:?}",
            expression
        );
    }
}

#[test]
fn unterminated_tag_terminates_tokenization() {
    let tokens = xml::tokenize("<foo", &Trace::disabled());
    assert_eq!(tokens, vec![Token::begin("foo"), Token::EndOfStream]);
}

/// Every Begin has exactly one matching End in stack order, and depth is
/// zero at EndOfStream.
fn assert_balanced(tokens: &[Token]) {
    let mut stack: Vec<&str> = Vec::new();
    for token in tokens {
        match token {
            Token::Begin { name } => stack.push(name),
            Token::End { name } => {
                assert_eq!(stack.pop(), Some(&**name), "mismatched end {:?}", name);
            }
            Token::EndOfStream => assert!(stack.is_empty(), "open names at end: {:?}", stack),
            _ => {}
        }
    }
}

#[test]
fn well_formed_streams_obey_stack_discipline() {
    assert_balanced(&xml::tokenize(XML_INPUT, &Trace::disabled()));
    assert_balanced(&json::tokenize(JSON_INPUT, &Trace::disabled()));
    assert_balanced(&json::tokenize(
        "{ a: { b: \"x\" }, c: \"y\" }",
        &Trace::disabled(),
    ));
    assert_balanced(&xml::tokenize(
        "<a p=\"q\"><b>x</b><c/></a>",
        &Trace::disabled(),
    ));
}

#[test]
fn every_stream_ends_with_exactly_one_terminal_token() {
    // a consumer reading token by token can stop on is_terminal alone
    let streams = vec![
        xml::tokenize(XML_INPUT, &Trace::disabled()),
        xml::tokenize("<foo", &Trace::disabled()),
        xml::tokenize("", &Trace::disabled()),
        json::tokenize(JSON_INPUT, &Trace::disabled()),
        json::tokenize("world = \"nada\"", &Trace::disabled()),
        json::tokenize("", &Trace::disabled()),
    ];
    for tokens in streams {
        let (last, rest) = tokens.split_last().unwrap();
        assert!(last.is_terminal(), "stream ends in {}", last);
        assert!(rest.iter().all(|token| !token.is_terminal()));
    }
}

#[test]
fn find_next_enumerates_then_stays_empty() {
    let tokens = xml::tokenize(XML_INPUT, &Trace::disabled());
    let path = Path::new(&tokens);

    let mut worlds = Vec::new();
    let mut q = path.find_first("world");
    while !q.is_empty() {
        worlds.push(q.text_value());
        q = q.find_next("world");
    }
    assert_eq!(worlds, vec!["nada".to_string(), "earth".to_string(), String::new()]);
    assert!(q.find_next("world").is_empty());

    // find_nth agrees with the enumeration
    for (i, expected) in worlds.iter().enumerate() {
        assert_eq!(&path.find_nth("world", i + 1).text_value(), expected);
    }
    assert!(path.find_nth("world", worlds.len() + 1).is_empty());
}

#[test]
fn navigation_survives_a_truncated_document() {
    // the error token ends the stream; earlier tokens still navigate
    let tokens = json::tokenize("galaxy: { world: \"earth\", = }", &Trace::disabled());
    assert!(matches!(tokens.last(), Some(Token::Error { .. })));
    let path = Path::new(&tokens);
    assert_eq!(path.find_first("world").text_value(), "earth");
}
