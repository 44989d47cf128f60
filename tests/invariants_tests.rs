// tests/invariants_tests.rs
//
// Universal properties every successful parse must uphold, regardless of the
// entry point: full-span roots, raw/slice agreement, parent/child interval
// containment, sibling ordering, determinism and the error positions.

use pretty_assertions::assert_eq;

use odata_uri_parser::{
    parse_filter, parse_keys, parse_literal, parse_odata_uri, parse_query_options,
    parse_resource_path, ParseError, Token, TokenKind,
};

fn walk<'t>(token: &'t Token, visit: &mut impl FnMut(&'t Token)) {
    visit(token);
    for child in token.children() {
        walk(child, visit);
    }
}

const INPUTS: &[(&str, fn(&str) -> Result<Token, ParseError>)] = &[
    ("Name eq 'John'", parse_filter),
    (
        "Categories/all(d:d/Title eq 'alma') and Price mul 2 le 100.5",
        parse_filter,
    ),
    ("contains(tolower(Name),'j') or not Active", parse_filter),
    (
        "$filter=Age gt 21&$orderby=Name desc,Age&$expand=Orders($top=2;$search=blue OR red)&x=1",
        parse_query_options,
    ),
    ("$select=*,Category/Name&$count=true&$skiptoken=abc", parse_query_options),
    ("Products(1)/Category/Name", parse_resource_path),
    ("(OrderID=1,ItemNo='A')", parse_keys),
    ("geography'SRID=4326;LineString(1 1,2 2)'", parse_literal),
    (
        "http://example.com/svc/Products(1)?$top=2&$filter=Name ne null",
        parse_odata_uri,
    ),
];

#[test]
fn test_roots_span_the_whole_input() {
    for (source, parse) in INPUTS {
        let token = parse(source).unwrap_or_else(|e| panic!("{}: {:?}", source, e));
        assert_eq!(token.position, 0, "{}", source);
        assert_eq!(token.next, source.len(), "{}", source);
    }
}

#[test]
fn test_raw_is_the_exact_source_slice() {
    for (source, parse) in INPUTS {
        let token = parse(source).unwrap();
        walk(&token, &mut |node| {
            assert!(node.position <= node.next, "{}", source);
            assert_eq!(
                &source[node.position..node.next],
                node.raw,
                "kind {:?} in {}",
                node.kind,
                source
            );
        });
    }
}

#[test]
fn test_children_are_contained_and_ordered() {
    for (source, parse) in INPUTS {
        let token = parse(source).unwrap();
        walk(&token, &mut |node| {
            let mut last_end = node.position;
            for child in node.children() {
                assert!(
                    node.position <= child.position && child.next <= node.next,
                    "child {:?} escapes parent {:?} in {}",
                    child.kind,
                    node.kind,
                    source
                );
                assert!(
                    last_end <= child.position,
                    "siblings overlap under {:?} in {}",
                    node.kind,
                    source
                );
                last_end = child.next;
            }
        });
    }
}

#[test]
fn test_parsing_is_deterministic() {
    for (source, parse) in INPUTS {
        assert_eq!(parse(source).unwrap(), parse(source).unwrap(), "{}", source);
    }
}

#[test]
fn test_literal_nodes_round_trip() {
    for (source, parse) in INPUTS {
        let token = parse(source).unwrap();
        walk(&token, &mut |node| {
            if node.kind == TokenKind::Literal {
                let reparsed = parse_literal(&node.raw)
                    .unwrap_or_else(|e| panic!("{} from {}: {:?}", node.raw, source, e));
                assert_eq!(reparsed.raw, node.raw);
                assert_eq!(reparsed.value, node.value);
            }
        });
    }
}

#[test]
fn test_expression_roots_round_trip() {
    let token = parse_query_options("$filter=(A eq 1 or B lt 2) and C/any()").unwrap();
    walk(&token, &mut |node| {
        if node.kind == TokenKind::Filter {
            if let odata_uri_parser::TokenValue::Unary(expr) = &node.value {
                let reparsed = parse_filter(&expr.raw).unwrap();
                assert_eq!(reparsed.kind, expr.kind);
                assert_eq!(reparsed.raw, expr.raw);
            }
        }
    });
}

// ============================================================================
// Error positions
// ============================================================================

#[test]
fn test_every_entry_point_rejects_empty_input() {
    assert_eq!(parse_filter(""), Err(ParseError::EmptyParse));
    assert_eq!(parse_query_options(""), Err(ParseError::EmptyParse));
    assert_eq!(parse_resource_path(""), Err(ParseError::EmptyParse));
    assert_eq!(parse_keys(""), Err(ParseError::EmptyParse));
    assert_eq!(parse_literal(""), Err(ParseError::EmptyParse));
    assert_eq!(parse_odata_uri(""), Err(ParseError::EmptyParse));
}

#[test]
fn test_single_stray_character_positions() {
    assert_eq!(
        parse_literal("42!"),
        Err(ParseError::TrailingInput { position: 2 })
    );
    assert_eq!(
        parse_resource_path("Products(1)!"),
        Err(ParseError::TrailingInput { position: 11 })
    );
    assert_eq!(
        parse_keys("(1)x"),
        Err(ParseError::TrailingInput { position: 3 })
    );
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_token_trees_serialize() {
    let token = parse_filter("Name eq 'John'").unwrap();
    let json = serde_json::to_value(&token).unwrap();

    assert_eq!(json["type"], "EqualsExpression");
    assert_eq!(json["position"], 0);
    assert_eq!(json["raw"], "Name eq 'John'");
    assert_eq!(json["value"]["Binary"]["right"]["value"]["Literal"], "Edm.String");
}
