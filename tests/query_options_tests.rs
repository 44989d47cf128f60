// tests/query_options_tests.rs

use pretty_assertions::assert_eq;

use odata_uri_parser::{
    parse_query_options, EdmType, ParseError, SortOrder, Token, TokenKind, TokenValue,
};

fn options(token: &Token) -> &[Token] {
    assert_eq!(token.kind, TokenKind::QueryOptions);
    match &token.value {
        TokenValue::Items(items) => items,
        other => panic!("expected items, got {:?}", other),
    }
}

fn unary(token: &Token) -> &Token {
    match &token.value {
        TokenValue::Unary(child) => child,
        other => panic!("expected a unary payload, got {:?}", other),
    }
}

fn items(token: &Token) -> &[Token] {
    match &token.value {
        TokenValue::Items(items) => items,
        other => panic!("expected items, got {:?}", other),
    }
}

// ============================================================================
// Paging options
// ============================================================================

#[test]
fn test_top_and_skip() {
    let token = parse_query_options("$top=10&$skip=20").unwrap();

    let opts = options(&token);
    assert_eq!(opts.len(), 2);

    assert_eq!(opts[0].kind, TokenKind::Top);
    let count = unary(&opts[0]);
    assert_eq!(count.raw, "10");
    assert_eq!(count.value, TokenValue::Literal(EdmType::Int32));

    assert_eq!(opts[1].kind, TokenKind::Skip);
    assert_eq!(unary(&opts[1]).raw, "20");
}

#[test]
fn test_top_rejects_a_signed_count() {
    assert!(parse_query_options("$top=-1").is_err());
}

#[test]
fn test_inlinecount() {
    let token = parse_query_options("$count=true").unwrap();

    let opts = options(&token);
    assert_eq!(opts[0].kind, TokenKind::InlineCount);
    assert_eq!(unary(&opts[0]).value, TokenValue::Literal(EdmType::Boolean));
}

#[test]
fn test_levels() {
    let token = parse_query_options("$levels=3&$top=1").unwrap();
    let opts = options(&token);
    assert_eq!(opts[0].kind, TokenKind::Levels);
    assert_eq!(opts[0].value, TokenValue::Text("3".to_string()));

    let token = parse_query_options("$levels=max").unwrap();
    assert_eq!(options(&token)[0].value, TokenValue::Text("max".to_string()));
}

// ============================================================================
// $filter / $orderby
// ============================================================================

#[test]
fn test_filter_option_wraps_the_expression() {
    let token = parse_query_options("$filter=Name eq 'John'").unwrap();

    let opts = options(&token);
    assert_eq!(opts[0].kind, TokenKind::Filter);
    assert_eq!(opts[0].raw, "$filter=Name eq 'John'");
    assert_eq!(unary(&opts[0]).kind, TokenKind::EqualsExpression);
}

#[test]
fn test_malformed_filter_fails_the_whole_parse() {
    assert_eq!(
        parse_query_options("$filter=???&$top=1"),
        Err(ParseError::EmptyParse)
    );
}

#[test]
fn test_orderby_items() {
    let token = parse_query_options("$orderby=foo,bar").unwrap();

    let opts = options(&token);
    assert_eq!(opts.len(), 1);
    assert_eq!(opts[0].kind, TokenKind::OrderBy);

    let list = items(&opts[0]);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].raw, "foo");
    assert_eq!(list[1].raw, "bar");
    match &list[0].value {
        TokenValue::OrderByItem { direction, .. } => assert_eq!(*direction, SortOrder::Asc),
        other => panic!("expected an orderby item, got {:?}", other),
    }
}

#[test]
fn test_orderby_direction() {
    let token = parse_query_options("$orderby=Name desc,Age asc").unwrap();

    let list = items(&options(&token)[0]);
    assert_eq!(list[0].raw, "Name desc");
    match &list[0].value {
        TokenValue::OrderByItem { expr, direction } => {
            assert_eq!(expr.raw, "Name");
            assert_eq!(*direction, SortOrder::Desc);
        }
        other => panic!("expected an orderby item, got {:?}", other),
    }
    match &list[1].value {
        TokenValue::OrderByItem { direction, .. } => assert_eq!(*direction, SortOrder::Asc),
        other => panic!("expected an orderby item, got {:?}", other),
    }
}

// ============================================================================
// $select / $expand
// ============================================================================

#[test]
fn test_select() {
    let token = parse_query_options("$select=Name,Category/Title,*").unwrap();

    let list = items(&options(&token)[0]);
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].kind, TokenKind::SelectItem);
    assert_eq!(unary(&list[0]).kind, TokenKind::PropertyPathExpression);
    assert_eq!(list[1].raw, "Category/Title");
    assert_eq!(unary(&list[2]).kind, TokenKind::Star);
}

#[test]
fn test_expand_with_nested_options() {
    let token =
        parse_query_options("$expand=Orders($filter=Amount gt 10;$top=2),Customer").unwrap();

    let list = items(&options(&token)[0]);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].kind, TokenKind::ExpandItem);

    match &list[0].value {
        TokenValue::ExpandItem { path, options } => {
            assert_eq!(path.raw, "Orders");
            assert_eq!(options.len(), 2);
            assert_eq!(options[0].kind, TokenKind::Filter);
            assert_eq!(options[1].kind, TokenKind::Top);
        }
        other => panic!("expected an expand item, got {:?}", other),
    }

    match &list[1].value {
        TokenValue::ExpandItem { path, options } => {
            assert_eq!(path.raw, "Customer");
            assert!(options.is_empty());
        }
        other => panic!("expected an expand item, got {:?}", other),
    }
}

#[test]
fn test_expand_nests_recursively() {
    let token = parse_query_options("$expand=Orders($expand=Items($levels=2))").unwrap();

    let list = items(&options(&token)[0]);
    match &list[0].value {
        TokenValue::ExpandItem { options, .. } => {
            assert_eq!(options[0].kind, TokenKind::Expand);
        }
        other => panic!("expected an expand item, got {:?}", other),
    }
}

#[test]
fn test_count_inside_expand_is_rejected() {
    assert!(parse_query_options("$expand=Orders($count=true)").is_err());
}

// ============================================================================
// $search
// ============================================================================

#[test]
fn test_search_words_and_operators() {
    let token = parse_query_options("$search=blue OR green").unwrap();

    let search = &options(&token)[0];
    assert_eq!(search.kind, TokenKind::Search);
    let expr = unary(search);
    assert_eq!(expr.kind, TokenKind::SearchOrExpression);
    match &expr.value {
        TokenValue::Binary { left, right } => {
            assert_eq!(left.kind, TokenKind::SearchWord);
            assert_eq!(left.raw, "blue");
            assert_eq!(right.raw, "green");
        }
        other => panic!("expected a binary payload, got {:?}", other),
    }
}

#[test]
fn test_search_implicit_and() {
    let token = parse_query_options("$search=blue green").unwrap();
    assert_eq!(unary(&options(&token)[0]).kind, TokenKind::SearchAndExpression);

    let token = parse_query_options("$search=blue AND green").unwrap();
    assert_eq!(unary(&options(&token)[0]).kind, TokenKind::SearchAndExpression);
}

#[test]
fn test_search_not_and_phrase() {
    let token = parse_query_options("$search=NOT \"blue%20bird\"").unwrap();

    let expr = unary(&options(&token)[0]);
    assert_eq!(expr.kind, TokenKind::SearchNotExpression);
    assert_eq!(unary(expr).kind, TokenKind::SearchPhrase);
}

#[test]
fn test_search_precedence_or_over_and() {
    // a AND b OR c  ==  (a AND b) OR c
    let token = parse_query_options("$search=a b OR c").unwrap();

    let expr = unary(&options(&token)[0]);
    assert_eq!(expr.kind, TokenKind::SearchOrExpression);
    match &expr.value {
        TokenValue::Binary { left, .. } => {
            assert_eq!(left.kind, TokenKind::SearchAndExpression)
        }
        other => panic!("expected a binary payload, got {:?}", other),
    }
}

// ============================================================================
// Custom options and the reserved prefix
// ============================================================================

#[test]
fn test_custom_options() {
    let token = parse_query_options("foo=123&bar=foobar").unwrap();

    let opts = options(&token);
    assert_eq!(opts.len(), 2);
    assert_eq!(opts[0].kind, TokenKind::CustomQueryOption);
    assert_eq!(
        opts[0].value,
        TokenValue::KeyValue {
            key: "foo".to_string(),
            value: "123".to_string(),
        }
    );
    assert_eq!(
        opts[1].value,
        TokenValue::KeyValue {
            key: "bar".to_string(),
            value: "foobar".to_string(),
        }
    );
}

#[test]
fn test_custom_option_without_a_value() {
    let token = parse_query_options("debug").unwrap();

    assert_eq!(
        options(&token)[0].value,
        TokenValue::KeyValue {
            key: "debug".to_string(),
            value: String::new(),
        }
    );
}

#[test]
fn test_unknown_dollar_option_never_becomes_custom() {
    assert_eq!(parse_query_options("$foo=123"), Err(ParseError::EmptyParse));
}

#[test]
fn test_bang_prefixed_custom_name_is_reserved() {
    assert_eq!(parse_query_options("!bang=1"), Err(ParseError::EmptyParse));
}

#[test]
fn test_system_and_custom_options_mix_in_source_order() {
    let token = parse_query_options("$filter=Age gt 21&foo=bar&$top=5").unwrap();

    let kinds: Vec<TokenKind> = options(&token).iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Filter,
            TokenKind::CustomQueryOption,
            TokenKind::Top
        ]
    );
}

// ============================================================================
// $format / $skiptoken
// ============================================================================

#[test]
fn test_format() {
    let token = parse_query_options("$format=json").unwrap();
    assert_eq!(options(&token)[0].kind, TokenKind::Format);
    assert_eq!(
        options(&token)[0].value,
        TokenValue::Text("json".to_string())
    );
}

#[test]
fn test_media_type_format_is_rejected() {
    assert!(parse_query_options("$format=application%2Fjson").is_err());
    assert!(parse_query_options("$format=csv").is_err());
}

#[test]
fn test_skiptoken() {
    let token = parse_query_options("$skiptoken=233069").unwrap();
    assert_eq!(options(&token)[0].kind, TokenKind::SkipToken);
    assert_eq!(
        options(&token)[0].value,
        TokenValue::Text("233069".to_string())
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(parse_query_options(""), Err(ParseError::EmptyParse));
}

#[test]
fn test_trailing_separator() {
    assert_eq!(
        parse_query_options("$top=1&"),
        Err(ParseError::TrailingInput { position: 6 })
    );
}
