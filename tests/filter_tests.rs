// tests/filter_tests.rs

use pretty_assertions::assert_eq;

use odata_uri_parser::{parse_filter, EdmType, ParseError, Token, TokenKind, TokenValue};

fn binary(token: &Token) -> (&Token, &Token) {
    match &token.value {
        TokenValue::Binary { left, right } => (left.as_ref(), right.as_ref()),
        other => panic!("expected a binary payload, got {:?}", other),
    }
}

fn unary(token: &Token) -> &Token {
    match &token.value {
        TokenValue::Unary(child) => child,
        other => panic!("expected a unary payload, got {:?}", other),
    }
}

// ============================================================================
// Comparison and logical operators
// ============================================================================

#[test]
fn test_simple_equality() {
    let token = parse_filter("Name eq 'John'").unwrap();

    assert_eq!(token.kind, TokenKind::EqualsExpression);
    assert_eq!(token.raw, "Name eq 'John'");

    let (left, right) = binary(&token);
    assert_eq!(left.raw, "Name");
    assert_eq!(left.kind, TokenKind::FirstMemberExpression);
    assert_eq!(right.kind, TokenKind::Literal);
    assert_eq!(right.raw, "'John'");
    assert_eq!(right.value, TokenValue::Literal(EdmType::String));
}

#[test]
fn test_paren_or_and_precedence() {
    let token = parse_filter("(Name eq 'John' or Name eq 'Jane') and Age gt 21").unwrap();

    assert_eq!(token.kind, TokenKind::AndExpression);
    let (left, right) = binary(&token);

    assert_eq!(left.kind, TokenKind::ParenExpression);
    assert_eq!(unary(left).kind, TokenKind::OrExpression);

    assert_eq!(right.kind, TokenKind::GreaterThanExpression);
    let (_, age) = binary(right);
    assert_eq!(age.raw, "21");
    assert_eq!(age.value, TokenValue::Literal(EdmType::Int32));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let token = parse_filter("A eq 1 or B eq 2 and C eq 3").unwrap();

    assert_eq!(token.kind, TokenKind::OrExpression);
    let (left, right) = binary(&token);
    assert_eq!(left.raw, "A eq 1");
    assert_eq!(right.kind, TokenKind::AndExpression);
}

#[test]
fn test_arithmetic_precedence() {
    let token = parse_filter("Price add Tax mul 2 eq 42").unwrap();

    assert_eq!(token.kind, TokenKind::EqualsExpression);
    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::AddExpression);
    let (_, mul) = binary(left);
    assert_eq!(mul.kind, TokenKind::MulExpression);
    assert_eq!(mul.raw, "Tax mul 2");
}

#[test]
fn test_left_associativity() {
    let token = parse_filter("N sub 1 sub 2 eq 0").unwrap();

    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::SubExpression);
    let (inner, two) = binary(left);
    assert_eq!(inner.raw, "N sub 1");
    assert_eq!(two.raw, "2");
}

#[test]
fn test_operand_spans_flank_the_operator() {
    let token = parse_filter("Age ge 18").unwrap();

    let (left, right) = binary(&token);
    assert!(left.next <= right.position);
    assert_eq!(token.position, left.position);
    assert_eq!(token.next, right.next);
}

#[test]
fn test_percent_encoded_whitespace_around_operator() {
    let token = parse_filter("Age%20gt%2021").unwrap();

    assert_eq!(token.kind, TokenKind::GreaterThanExpression);
    assert_eq!(token.raw, "Age%20gt%2021");
}

// ============================================================================
// Unary forms
// ============================================================================

#[test]
fn test_not_expression() {
    let token = parse_filter("not contains(Name,'x')").unwrap();

    assert_eq!(token.kind, TokenKind::NotExpression);
    assert_eq!(unary(&token).kind, TokenKind::MethodCallExpression);
}

#[test]
fn test_negate_member() {
    let token = parse_filter("-Price lt 0").unwrap();

    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::NegateExpression);
    assert_eq!(unary(left).raw, "Price");
}

#[test]
fn test_signed_number_is_a_literal_not_a_negate() {
    let token = parse_filter("Price lt -5").unwrap();

    let (_, right) = binary(&token);
    assert_eq!(right.kind, TokenKind::Literal);
    assert_eq!(right.raw, "-5");
    assert_eq!(right.value, TokenValue::Literal(EdmType::Int32));
}

// ============================================================================
// Keyword boundaries
// ============================================================================

#[test]
fn test_keywords_do_not_shadow_member_names() {
    // `null`, `not` and `or` all prefix these member names
    for filter in ["nullable eq 1", "notify eq 1", "orders eq 1"] {
        let token = parse_filter(filter).unwrap();
        assert_eq!(token.kind, TokenKind::EqualsExpression, "{}", filter);
        let (left, _) = binary(&token);
        assert_eq!(left.kind, TokenKind::FirstMemberExpression);
    }
}

// ============================================================================
// Method calls
// ============================================================================

#[test]
fn test_method_call() {
    let token = parse_filter("contains(Name,'John')").unwrap();

    assert_eq!(token.kind, TokenKind::MethodCallExpression);
    match &token.value {
        TokenValue::Method { method, parameters } => {
            assert_eq!(method, "contains");
            assert_eq!(parameters.len(), 2);
            assert_eq!(parameters[0].raw, "Name");
            assert_eq!(parameters[1].raw, "'John'");
        }
        other => panic!("expected a method payload, got {:?}", other),
    }
}

#[test]
fn test_method_call_loses_to_member_path_without_parens() {
    let token = parse_filter("containsx eq 1").unwrap();

    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::FirstMemberExpression);
    assert_eq!(left.raw, "containsx");
}

#[test]
fn test_nested_method_calls() {
    let token = parse_filter("startswith(tolower(Name),'j')").unwrap();

    match &token.value {
        TokenValue::Method { parameters, .. } => {
            assert_eq!(parameters[0].kind, TokenKind::MethodCallExpression);
        }
        other => panic!("expected a method payload, got {:?}", other),
    }
}

#[test]
fn test_zero_arity_method() {
    let token = parse_filter("now() gt 2020-01-01T00:00Z").unwrap();

    let (left, right) = binary(&token);
    assert_eq!(left.kind, TokenKind::MethodCallExpression);
    assert_eq!(left.raw, "now()");
    assert_eq!(right.value, TokenValue::Literal(EdmType::DateTimeOffset));
}

#[test]
fn test_method_arity_is_enforced() {
    // the call form is refused, so `length` falls back to a member path and
    // the argument list is left dangling
    assert_eq!(
        parse_filter("length(Name,Name)"),
        Err(ParseError::TrailingInput { position: 6 })
    );
    assert!(parse_filter("substring(Name,1)").is_ok());
    assert!(parse_filter("substring(Name,1,2)").is_ok());
}

#[test]
fn test_geo_method() {
    let token =
        parse_filter("geo.distance(Location,geography'SRID=0;Point(142.1 64.1)') lt 42.5")
            .unwrap();

    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::MethodCallExpression);
    match &left.value {
        TokenValue::Method { method, parameters } => {
            assert_eq!(method, "geo.distance");
            assert_eq!(
                parameters[1].value,
                TokenValue::Literal(EdmType::GeographyPoint)
            );
        }
        other => panic!("expected a method payload, got {:?}", other),
    }
}

#[test]
fn test_cast_and_isof() {
    let token = parse_filter("cast(Total,Edm.Decimal) gt 10").unwrap();
    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::CastExpression);
    match &left.value {
        TokenValue::Method { method, parameters } => {
            assert_eq!(method, "cast");
            assert_eq!(parameters.len(), 2);
            assert_eq!(parameters[1].kind, TokenKind::PrimitiveTypeName);
        }
        other => panic!("expected a method payload, got {:?}", other),
    }

    let token = parse_filter("isof(Model.Manager)").unwrap();
    assert_eq!(token.kind, TokenKind::IsOfExpression);
    match &token.value {
        TokenValue::Method { parameters, .. } => {
            assert_eq!(parameters.len(), 1);
            assert_eq!(parameters[0].kind, TokenKind::QualifiedEntityTypeName);
        }
        other => panic!("expected a method payload, got {:?}", other),
    }
}

// ============================================================================
// Member paths and lambdas
// ============================================================================

#[test]
fn test_member_path_segments() {
    let token = parse_filter("Category/Name eq 'Toys'").unwrap();

    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::FirstMemberExpression);
    assert_eq!(left.raw, "Category/Name");
    let path = unary(left);
    assert_eq!(path.kind, TokenKind::PropertyPathExpression);
    match &path.value {
        TokenValue::Items(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].raw, "Category");
            assert_eq!(items[1].raw, "Name");
        }
        other => panic!("expected items, got {:?}", other),
    }
}

#[test]
fn test_all_lambda() {
    let token = parse_filter("Categories/all(d:d/Title eq 'alma')").unwrap();

    assert_eq!(token.kind, TokenKind::AllExpression);
    match &token.value {
        TokenValue::Lambda {
            collection,
            variable,
            predicate,
        } => {
            assert_eq!(collection.raw, "Categories");
            assert_eq!(variable.as_ref().unwrap().raw, "d");

            let predicate = predicate.as_ref().unwrap();
            assert_eq!(predicate.kind, TokenKind::EqualsExpression);
            let (_, right) = binary(predicate);
            assert_eq!(right.kind, TokenKind::Literal);
            assert_eq!(right.value, TokenValue::Literal(EdmType::String));
        }
        other => panic!("expected a lambda payload, got {:?}", other),
    }
}

#[test]
fn test_empty_any() {
    let token = parse_filter("Items/any()").unwrap();

    assert_eq!(token.kind, TokenKind::AnyExpression);
    match &token.value {
        TokenValue::Lambda {
            variable,
            predicate,
            ..
        } => {
            assert!(variable.is_none());
            assert!(predicate.is_none());
        }
        other => panic!("expected a lambda payload, got {:?}", other),
    }
}

#[test]
fn test_empty_all_is_rejected() {
    assert_eq!(parse_filter("Items/all()"), Err(ParseError::EmptyParse));
}

#[test]
fn test_any_over_longer_path() {
    let token = parse_filter("Orders/Items/any(i:i/Qty gt 2)").unwrap();

    assert_eq!(token.kind, TokenKind::AnyExpression);
    match &token.value {
        TokenValue::Lambda { collection, .. } => {
            assert_eq!(collection.raw, "Orders/Items");
        }
        other => panic!("expected a lambda payload, got {:?}", other),
    }
}

#[test]
fn test_root_expression() {
    let token = parse_filter("$root/Products(1)/Name eq 'x'").unwrap();

    let (left, _) = binary(&token);
    assert_eq!(left.kind, TokenKind::RootExpression);
    assert_eq!(unary(left).kind, TokenKind::ResourcePath);
}

// ============================================================================
// has / in
// ============================================================================

#[test]
fn test_has_enum_flag() {
    let token = parse_filter("Style has Sales.Pattern'Yellow'").unwrap();

    assert_eq!(token.kind, TokenKind::HasExpression);
    let (_, right) = binary(&token);
    assert_eq!(right.value, TokenValue::Literal(EdmType::Enum));
}

#[test]
fn test_in_list() {
    let token = parse_filter("Name in ('Milk','Cheese')").unwrap();

    assert_eq!(token.kind, TokenKind::InExpression);
    let (_, right) = binary(&token);
    assert_eq!(right.kind, TokenKind::ListExpression);
    match &right.value {
        TokenValue::Items(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].raw, "'Milk'");
        }
        other => panic!("expected items, got {:?}", other),
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_garbage_is_an_empty_parse() {
    assert_eq!(parse_filter("???invalid???"), Err(ParseError::EmptyParse));
}

#[test]
fn test_trailing_input_reports_the_position() {
    assert_eq!(
        parse_filter("Name eq 'John' ???"),
        Err(ParseError::TrailingInput { position: 14 })
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_filter(""), Err(ParseError::EmptyParse));
}
