//! A recursive-descent parser for OData v4 URIs, resource paths, query
//! options, `$filter` expressions, key predicates and primitive literals.
//!
//! Each entry point is a pure function from text to a [`Token`] tree; the
//! tree records, for every node, its kind, its exact source span and a
//! typed payload. The parser is database-agnostic: translating the tree
//! into SQL or anything else is a downstream concern.
//!
//! ```
//! use odata_uri_parser::{parse_filter, TokenKind};
//!
//! let token = parse_filter("Name eq 'John'").unwrap();
//! assert_eq!(token.kind, TokenKind::EqualsExpression);
//! assert_eq!(token.raw, "Name eq 'John'");
//! ```
//!
//! Parsing never needs a schema, but each entry point has a `_with` variant
//! taking an optional [`Document`] so names can be validated against EDM
//! metadata when one is available.

pub mod ast;
pub mod error;
pub mod schema;

mod parser;

pub use ast::{BinOp, EdmType, Method, SortOrder, Token, TokenKind, TokenValue};
pub use error::ParseError;
pub use schema::Document;

use parser::{Context, Input, TokenResult};

/// Parses a full URI: service root, then optionally a resource path and
/// query options.
pub fn parse_odata_uri(source: &str) -> Result<Token, ParseError> {
    parse_odata_uri_with(source, None)
}

pub fn parse_odata_uri_with(
    source: &str,
    metadata: Option<&Document>,
) -> Result<Token, ParseError> {
    entry(source, metadata, parser::uri::odataUri)
}

/// Parses a resource path, e.g. `Products(1)/Category`.
pub fn parse_resource_path(source: &str) -> Result<Token, ParseError> {
    parse_resource_path_with(source, None)
}

pub fn parse_resource_path_with(
    source: &str,
    metadata: Option<&Document>,
) -> Result<Token, ParseError> {
    entry(source, metadata, parser::resource_path::resourcePath)
}

/// Parses the query string after the `?`, e.g. `$top=10&$skip=20`.
pub fn parse_query_options(source: &str) -> Result<Token, ParseError> {
    parse_query_options_with(source, None)
}

pub fn parse_query_options_with(
    source: &str,
    metadata: Option<&Document>,
) -> Result<Token, ParseError> {
    entry(source, metadata, parser::query_options::queryOptions)
}

/// Parses a boolean filter expression, e.g. `Name eq 'John' and Age gt 21`.
pub fn parse_filter(source: &str) -> Result<Token, ParseError> {
    parse_filter_with(source, None)
}

pub fn parse_filter_with(source: &str, metadata: Option<&Document>) -> Result<Token, ParseError> {
    entry(source, metadata, parser::expressions::boolCommonExpr)
}

/// Parses a parenthesised key predicate, e.g. `(4711)` or `(a=1,b='x')`.
pub fn parse_keys(source: &str) -> Result<Token, ParseError> {
    parse_keys_with(source, None)
}

pub fn parse_keys_with(source: &str, metadata: Option<&Document>) -> Result<Token, ParseError> {
    entry(source, metadata, parser::resource_path::keyPredicate)
}

/// Parses a single primitive literal, e.g. `'O''Neil'` or `2147483647`.
pub fn parse_literal(source: &str) -> Result<Token, ParseError> {
    parse_literal_with(source, None)
}

pub fn parse_literal_with(source: &str, metadata: Option<&Document>) -> Result<Token, ParseError> {
    entry(source, metadata, parser::literals::primitiveLiteral)
}

/// Runs a combinator at index 0 and demands it consume the whole input. A
/// combinator that matches nothing is an [`ParseError::EmptyParse`]; one
/// that leaves a tail is a [`ParseError::TrailingInput`] carrying the first
/// unconsumed index. No partial tree ever escapes.
fn entry<F>(source: &str, metadata: Option<&Document>, f: F) -> Result<Token, ParseError>
where
    F: for<'a> Fn(Input<'a>) -> TokenResult<'a>,
{
    let ctx = Context { source, metadata };
    let input = Input::new(&ctx);
    match f(input) {
        Ok((rest, token)) => {
            if rest.is_empty() {
                Ok(token)
            } else {
                Err(ParseError::TrailingInput {
                    position: rest.pos(),
                })
            }
        }
        Err(_) => Err(ParseError::EmptyParse),
    }
}
