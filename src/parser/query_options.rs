//! The query-option layer: everything after the `?`.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, one_of};
use nom::combinator::{cut, opt, recognize, value, verify};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{delimited, pair, preceded, tuple};

use crate::ast::{EdmType, SortOrder, TokenKind, TokenValue};

use super::common::{
    pct_encoded, qchar_no_AMP, qchar_no_AMP_DQUOTE, qchar_no_AMP_EQ, quotation_mark, unreserved,
    ALPHA, BWS, CLOSE, COMMA, DIGIT, EQ, OPEN, RWS, SEMI, STAR,
};
use super::expressions::boolCommonExpr;
use super::literals::booleanValue;
use super::names::{keyword, odataIdentifier, qualifiedTypeName};
use super::{tok, Input, MatchResult, TokenResult};

//* ;------------------------------------------------------------------------------
//* ; 2. Query Options
//* ;------------------------------------------------------------------------------
//*
//* queryOptions = queryOption *( "&" queryOption )
pub(crate) fn queryOptions(input: Input) -> TokenResult {
    tok(TokenKind::QueryOptions, |i| {
        let (i, options) = separated_list1(tag("&"), queryOption)(i)?;
        Ok((i, TokenValue::Items(options)))
    })(input)
}

//* queryOption  = systemQueryOption
//*              / customQueryOption
//  The "$" prefix is reserved: a misspelled or unsupported system option
//  fails the parse outright instead of sliding into customQueryOption.
fn queryOption(input: Input) -> TokenResult {
    alt((systemQueryOption, customQueryOption))(input)
}

//* systemQueryOption = expand
//*                   / filter
//*                   / format
//*                   / inlinecount
//*                   / orderby
//*                   / search
//*                   / select
//*                   / skip
//*                   / skiptoken
//*                   / top
//*                   / levels
fn systemQueryOption(input: Input) -> TokenResult {
    alt((
        filter, select, expand, orderby, skiptoken, skip, top, inlinecount, search, format, levels,
    ))(input)
}

//* filter = '$filter' EQ boolCommonExpr
fn filter(input: Input) -> TokenResult {
    tok(TokenKind::Filter, |i| {
        let (i, _) = pair(tag("$filter"), EQ)(i)?;
        // Any errors after this point are fatal; a malformed expression must
        // not make the whole option backtrack
        let (i, expr) = cut(boolCommonExpr)(i)?;
        Ok((i, TokenValue::Unary(Box::new(expr))))
    })(input)
}

//* select = '$select' EQ selectItem *( COMMA selectItem )
fn select(input: Input) -> TokenResult {
    tok(TokenKind::Select, |i| {
        let (i, _) = pair(tag("$select"), EQ)(i)?;
        let (i, items) = cut(separated_list1(COMMA, selectItem))(i)?;
        Ok((i, TokenValue::Items(items)))
    })(input)
}

//* selectItem = STAR
//*            / [ ( qualifiedEntityTypeName / qualifiedComplexTypeName ) "/" ] selectProperty
//  Qualified action and function names are not accepted as select items.
fn selectItem(input: Input) -> TokenResult {
    tok(TokenKind::SelectItem, |i| {
        let (i, item) = alt((star, pathExpression))(i)?;
        Ok((i, TokenValue::Unary(Box::new(item))))
    })(input)
}

fn star(input: Input) -> TokenResult {
    tok(TokenKind::Star, |i| {
        let (i, _) = STAR(i)?;
        Ok((i, TokenValue::None))
    })(input)
}

//* selectPath = ( complexProperty / complexColProperty ) [ "/" qualifiedComplexTypeName ]
//* expandPath = [ ( qualifiedEntityTypeName / qualifiedComplexTypeName ) "/" ]
//*              *( ( complexProperty / complexColProperty ) "/" [ qualifiedComplexTypeName "/" ] )
//*              ( STAR / streamProperty / navigationProperty [ "/" qualifiedEntityTypeName ] )
//  Select and expand trails are the same shape without metadata: properties
//  and type casts separated by "/".
fn pathExpression(input: Input) -> TokenResult {
    tok(TokenKind::PropertyPathExpression, |i| {
        let (i, segments) =
            separated_list1(tag("/"), alt((qualifiedTypeName, odataIdentifier)))(i)?;
        Ok((i, TokenValue::Items(segments)))
    })(input)
}

//* expand = '$expand' EQ expandItem *( COMMA expandItem )
fn expand(input: Input) -> TokenResult {
    tok(TokenKind::Expand, |i| {
        let (i, _) = pair(tag("$expand"), EQ)(i)?;
        let (i, items) = cut(separated_list1(COMMA, expandItem))(i)?;
        Ok((i, TokenValue::Items(items)))
    })(input)
}

//* expandItem = expandPath [ OPEN expandOption *( SEMI expandOption ) CLOSE ]
fn expandItem(input: Input) -> TokenResult {
    tok(TokenKind::ExpandItem, |i| {
        let (i, path) = pathExpression(i)?;
        let (i, options) = opt(delimited(OPEN, separated_list1(SEMI, expandOption), CLOSE))(i)?;
        Ok((
            i,
            TokenValue::ExpandItem {
                path: Box::new(path),
                options: options.unwrap_or_default(),
            },
        ))
    })(input)
}

//* expandOption = filter
//*              / orderby
//*              / skip
//*              / top
//*              / levels
//*              / search
//*              / select
//*              / expand
//  '$count' is not accepted inside the parentheses.
fn expandOption(input: Input) -> TokenResult {
    alt((filter, select, expand, orderby, top, skip, levels, search))(input)
}

//* orderby     = '$orderby' EQ orderbyItem *( COMMA orderbyItem )
fn orderby(input: Input) -> TokenResult {
    tok(TokenKind::OrderBy, |i| {
        let (i, _) = pair(tag("$orderby"), EQ)(i)?;
        let (i, items) = cut(separated_list1(COMMA, orderbyItem))(i)?;
        Ok((i, TokenValue::Items(items)))
    })(input)
}

//* orderbyItem = commonExpr [ RWS ( 'asc' / 'desc' ) ]
fn orderbyItem(input: Input) -> TokenResult {
    let start = input.pos();
    let (i, expr) = boolCommonExpr(input)?;
    let (i, direction) = opt(preceded(
        RWS,
        alt((
            value(SortOrder::Asc, keyword(tag("asc"))),
            value(SortOrder::Desc, keyword(tag("desc"))),
        )),
    ))(i)?;
    let token = i.token_between(
        start,
        i.pos(),
        TokenKind::OrderByItem,
        TokenValue::OrderByItem {
            expr: Box::new(expr),
            direction: direction.unwrap_or(SortOrder::Asc),
        },
    );
    Ok((i, token))
}

//* top  = '$top'  EQ 1*DIGIT
fn top(input: Input) -> TokenResult {
    tok(TokenKind::Top, |i| {
        let (i, _) = pair(tag("$top"), EQ)(i)?;
        let (i, count) = cut(integerValue)(i)?;
        Ok((i, TokenValue::Unary(Box::new(count))))
    })(input)
}

//* skip = '$skip' EQ 1*DIGIT
fn skip(input: Input) -> TokenResult {
    tok(TokenKind::Skip, |i| {
        let (i, _) = pair(tag("$skip"), EQ)(i)?;
        let (i, count) = cut(integerValue)(i)?;
        Ok((i, TokenValue::Unary(Box::new(count))))
    })(input)
}

/// An unsigned integer literal, typed as narrowly as a bare literal would
/// be.
fn integerValue(input: Input) -> TokenResult {
    tok(TokenKind::Literal, |i| {
        let (i, digits) = digit1(i)?;
        let ty = if digits.as_str().parse::<i32>().is_ok() {
            EdmType::Int32
        } else if digits.as_str().parse::<i64>().is_ok() {
            EdmType::Int64
        } else {
            EdmType::Decimal
        };
        Ok((i, TokenValue::Literal(ty)))
    })(input)
}

//* inlinecount = '$count' EQ booleanValue
fn inlinecount(input: Input) -> TokenResult {
    tok(TokenKind::InlineCount, |i| {
        let (i, _) = pair(tag("$count"), EQ)(i)?;
        let (i, flag) = cut(booleanValue)(i)?;
        Ok((i, TokenValue::Unary(Box::new(flag))))
    })(input)
}

//* format = '$format' EQ ( "atom" / "json" / "xml" )
//  Media-type values (application/json and friends) are not accepted.
fn format(input: Input) -> TokenResult {
    tok(TokenKind::Format, |i| {
        let (i, _) = pair(tag("$format"), EQ)(i)?;
        let (i, kind) = cut(keyword(alt((tag("json"), tag("atom"), tag("xml")))))(i)?;
        Ok((i, TokenValue::Text(kind.as_str().to_string())))
    })(input)
}

//* skiptoken = '$skiptoken' EQ 1*( qchar-no-AMP )
fn skiptoken(input: Input) -> TokenResult {
    tok(TokenKind::SkipToken, |i| {
        let (i, _) = pair(tag("$skiptoken"), EQ)(i)?;
        let (i, opaque) = cut(recognize(many1(qchar_no_AMP)))(i)?;
        Ok((i, TokenValue::Text(opaque.as_str().to_string())))
    })(input)
}

//* levels = '$levels' EQ ( 1*DIGIT / 'max' )
fn levels(input: Input) -> TokenResult {
    tok(TokenKind::Levels, |i| {
        let (i, _) = pair(tag("$levels"), EQ)(i)?;
        let (i, depth) = cut(alt((digit1, keyword(tag("max")))))(i)?;
        Ok((i, TokenValue::Text(depth.as_str().to_string())))
    })(input)
}

//* search     = '$search' EQ BWS searchExpr
fn search(input: Input) -> TokenResult {
    tok(TokenKind::Search, |i| {
        let (i, _) = pair(tag("$search"), EQ)(i)?;
        let (i, _) = BWS(i)?;
        let (i, expr) = cut(searchExpr)(i)?;
        Ok((i, TokenValue::Unary(Box::new(expr))))
    })(input)
}

//* searchExpr = searchOrExpr
fn searchExpr(input: Input) -> TokenResult {
    searchOrExpr(input)
}

//* searchOrExpr  = searchAndExpr *( RWS 'OR' RWS searchAndExpr )
fn searchOrExpr(input: Input) -> TokenResult {
    let (mut input, mut lhs) = searchAndExpr(input)?;
    while let (i, Some(rhs)) =
        opt(preceded(tuple((RWS, tag("OR"), RWS)), searchAndExpr))(input)?
    {
        lhs = i.token_between(
            lhs.position,
            rhs.next,
            TokenKind::SearchOrExpression,
            TokenValue::Binary {
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
        );
        input = i;
    }
    Ok((input, lhs))
}

//* searchAndExpr = searchTerm *( RWS [ 'AND' RWS ] searchTerm )
//  Two adjacent terms are an implicit AND.
fn searchAndExpr(input: Input) -> TokenResult {
    let (mut input, mut lhs) = searchTerm(input)?;
    while let (i, Some(rhs)) = opt(preceded(
        tuple((RWS, opt(pair(tag("AND"), RWS)))),
        searchTerm,
    ))(input)?
    {
        lhs = i.token_between(
            lhs.position,
            rhs.next,
            TokenKind::SearchAndExpression,
            TokenValue::Binary {
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
        );
        input = i;
    }
    Ok((input, lhs))
}

//* searchTerm   = [ 'NOT' RWS ] ( searchPhrase / searchWord )
fn searchTerm(input: Input) -> TokenResult {
    alt((searchNotExpr, searchPhrase, searchWord))(input)
}

fn searchNotExpr(input: Input) -> TokenResult {
    tok(TokenKind::SearchNotExpression, |i| {
        let (i, _) = pair(tag("NOT"), RWS)(i)?;
        let (i, term) = searchTerm(i)?;
        Ok((i, TokenValue::Unary(Box::new(term))))
    })(input)
}

//* searchPhrase = quotation-mark 1*qchar-no-AMP-DQUOTE quotation-mark
fn searchPhrase(input: Input) -> TokenResult {
    tok(TokenKind::SearchPhrase, |i| {
        let (i, _) = recognize(tuple((
            quotation_mark,
            many1(qchar_no_AMP_DQUOTE),
            quotation_mark,
        )))(i)?;
        Ok((i, TokenValue::None))
    })(input)
}

//* ; A searchWord is a sequence of one or more letters, digits, commas, or dots.
//* ; The words AND, OR, and NOT are not a valid searchWord.
//* searchWord   = 1*( ALPHA / DIGIT / pct-encoded )
fn searchWord(input: Input) -> TokenResult {
    tok(TokenKind::SearchWord, |i| {
        let (i, _) = verify(
            recognize(many1(alt((ALPHA, DIGIT, pct_encoded)))),
            |word: &Input| !matches!(word.as_str(), "AND" | "OR" | "NOT"),
        )(i)?;
        Ok((i, TokenValue::None))
    })(input)
}

//* customQueryOption = customName [ EQ customValue ]
fn customQueryOption(input: Input) -> TokenResult {
    tok(TokenKind::CustomQueryOption, |i| {
        let (i, name) = customName(i)?;
        let (i, value) = opt(preceded(EQ, customValue))(i)?;
        Ok((
            i,
            TokenValue::KeyValue {
                key: name.as_str().to_string(),
                value: value.map(|v| v.as_str().to_string()).unwrap_or_default(),
            },
        ))
    })(input)
}

//* customName  = qchar-no-AMP-EQ-AT-DOLLAR *( qchar-no-AMP-EQ )
//  Besides "$" and "@", names opening with "!" are reserved too.
fn customName(input: Input) -> MatchResult {
    recognize(pair(customNameLeading, many0(qchar_no_AMP_EQ)))(input)
}

fn customNameLeading(input: Input) -> MatchResult {
    alt((unreserved, pct_encoded, recognize(one_of("()*+,;:/?'"))))(input)
}

//* customValue = *( qchar-no-AMP )
fn customValue(input: Input) -> MatchResult {
    recognize(many0(qchar_no_AMP))(input)
}
